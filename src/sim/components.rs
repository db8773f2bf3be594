use bitflags::bitflags;
use glam::Vec2;

/// World-space position of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Hit points.  The actor is removed once this drops to 0 or below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health(pub i32);

/// Marker for hostile actors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enemy;

bitflags! {
    /// Buttons held (or, for FIRE, pressed) during one frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const FORWARD  = 0b0000_0001;
        const BACKWARD = 0b0000_0010;
        const LEFT     = 0b0000_0100;
        const RIGHT    = 0b0000_1000;
        const FIRE     = 0b0001_0000; // edge-triggered
    }
}

/// Intent message produced by the input layer once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCmd {
    pub buttons: Buttons,
}

impl InputCmd {
    pub fn new(buttons: Buttons) -> Self {
        Self { buttons }
    }

    /// −1, 0 or +1; opposite keys cancel out.
    #[inline]
    pub fn forward(&self) -> f32 {
        axis(
            self.buttons.contains(Buttons::FORWARD),
            self.buttons.contains(Buttons::BACKWARD),
        )
    }

    /// −1 (left), 0 or +1 (right).
    #[inline]
    pub fn turn(&self) -> f32 {
        axis(
            self.buttons.contains(Buttons::RIGHT),
            self.buttons.contains(Buttons::LEFT),
        )
    }

    #[inline]
    pub fn fire(&self) -> bool {
        self.buttons.contains(Buttons::FIRE)
    }
}

#[inline]
fn axis(pos: bool, neg: bool) -> f32 {
    match (pos, neg) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
