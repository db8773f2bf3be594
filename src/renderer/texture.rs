// Sprite texels for the software back-end.  Textures are drawn from ASCII art
// so the game needs no asset files.

/// 32-bit **ARGB** (0xAARRGGBB) texels in row-major order.
/// Alpha 0 marks a transparent texel; anything else is drawn opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u32>,
}

/// Convenience checkerboard 8×8 (dark/light grey), used when a built-in
/// texture fails to build.
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: u32 = 0xFF_A0A0A0;
        const DARK: u32 = 0xFF_505050;
        let mut pix = vec![0u32; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "CHECKER".to_string(),
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture has no texels")]
    Empty,

    #[error("texture row {0} differs in width from the first row")]
    Ragged(usize),

    /// Glyph with no palette entry.
    #[error("glyph {0:?} not in palette")]
    UnknownGlyph(char),
}

const ENEMY_ART: &[&str] = &[
    "......RRRR......",
    "....RRRRRRRR....",
    "...RRRRRRRRRR...",
    "...RRYYRRYYRR...",
    "...RRYKRRKYRR...",
    "...RRRRRRRRRR...",
    "....RRWWWWRR....",
    ".....RRRRRR.....",
    "...DDRRRRRRDD...",
    "..DDDRRRRRRDDD..",
    ".DD.DRRRRRRD.DD.",
    ".D..DRRRRRRD..D.",
    "....DDD..DDD....",
    "....DD....DD....",
    "...DDD....DDD...",
    "..DDDD....DDDD..",
];

const ENEMY_PALETTE: &[(char, u32)] = &[
    ('.', 0x00_000000),
    ('R', 0xFF_C02020),
    ('D', 0xFF_801010),
    ('Y', 0xFF_FFE040),
    ('K', 0xFF_000000),
    ('W', 0xFF_FFFFFF),
];

impl Texture {
    /// Build a texture from equal-width rows of glyphs.
    pub fn from_ascii(
        name: &str,
        rows: &[&str],
        palette: &[(char, u32)],
    ) -> Result<Self, TextureError> {
        let w = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if w == 0 {
            return Err(TextureError::Empty);
        }
        let mut pixels = Vec::with_capacity(w * rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != w {
                return Err(TextureError::Ragged(i));
            }
            for ch in row.chars() {
                let (_, argb) = palette
                    .iter()
                    .find(|(g, _)| *g == ch)
                    .ok_or(TextureError::UnknownGlyph(ch))?;
                pixels.push(*argb);
            }
        }
        Ok(Self {
            name: name.to_owned(),
            w,
            h: rows.len(),
            pixels,
        })
    }

    /// The built-in enemy billboard.
    pub fn enemy() -> Self {
        Self::from_ascii("ENEMY", ENEMY_ART, ENEMY_PALETTE).unwrap_or_else(|e| {
            log::warn!("enemy sprite: {e}; using checkerboard");
            Self::default()
        })
    }

    #[inline]
    pub fn texel(&self, u: usize, v: usize) -> u32 {
        self.pixels[v.min(self.h - 1) * self.w + u.min(self.w - 1)]
    }

    #[inline]
    pub fn is_transparent(texel: u32) -> bool {
        texel >> 24 == 0
    }
}
