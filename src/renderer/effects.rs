//! Presentation-only fire feedback.
//!
//! Firing switches the muzzle flash and the weapon highlight on and schedules
//! one-shot reverts.  Timers are never cancelled: a revert scheduled by an
//! earlier shot still fires even if another shot came in meanwhile.  None of
//! this feeds back into the simulation.

use smallvec::SmallVec;
use std::time::{Duration, Instant};

pub const MUZZLE_FLASH_OPACITY: f32 = 0.8;
pub const MUZZLE_FLASH_TIME: Duration = Duration::from_millis(80);
pub const WEAPON_FLASH_TIME: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Revert {
    MuzzleFlash,
    WeaponFlash,
}

#[derive(Default)]
pub struct Effects {
    muzzle_opacity: f32,
    weapon_flash: bool,
    pending: SmallVec<[(Instant, Revert); 4]>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger the fire feedback at `now`.
    pub fn fire(&mut self, now: Instant) {
        self.muzzle_opacity = MUZZLE_FLASH_OPACITY;
        self.weapon_flash = true;
        self.pending.push((now + MUZZLE_FLASH_TIME, Revert::MuzzleFlash));
        self.pending.push((now + WEAPON_FLASH_TIME, Revert::WeaponFlash));
    }

    /// Run every revert whose deadline has passed.
    pub fn update(&mut self, now: Instant) {
        let mut i = 0;
        while i < self.pending.len() {
            let (due, what) = self.pending[i];
            if due <= now {
                match what {
                    Revert::MuzzleFlash => self.muzzle_opacity = 0.0,
                    Revert::WeaponFlash => self.weapon_flash = false,
                }
                self.pending.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    #[inline]
    pub fn muzzle_opacity(&self) -> f32 {
        self.muzzle_opacity
    }

    #[inline]
    pub fn weapon_flash(&self) -> bool {
        self.weapon_flash
    }

    /// No timers outstanding.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}
