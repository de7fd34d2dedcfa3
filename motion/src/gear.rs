// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Per-wheel gear state for the four-wheel drive train.
//!
//! Each wheel carries one signed gear in `[-3, 3]`: the sign is the wheel's
//! direction (non-negative drives forward), the magnitude is the speed tier
//! (0 = stopped, 1..3 = increasing duty). All maneuvers are expressed as
//! assignments to this vector; the translator in [`crate::drive`] turns it
//! into hardware writes.

use defmt::Format;

/// Highest forward gear.
pub const GEAR_MAX: i8 = 3;

/// Highest reverse gear.
pub const GEAR_MIN: i8 = -3;

/// Gear values for the four wheels, in `lf, lb, rf, rb` order.
///
/// Values outside `[-3, 3]` may transiently appear when a maneuver does
/// arithmetic on the current gears; the translator saturates them back into
/// range on the next output refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct GearState {
    /// Left-front wheel gear
    pub lf: i8,
    /// Left-back wheel gear
    pub lb: i8,
    /// Right-front wheel gear
    pub rf: i8,
    /// Right-back wheel gear
    pub rb: i8,
}

impl GearState {
    /// All four wheels stopped.
    pub const STOPPED: GearState = GearState::of(0, 0, 0, 0);

    /// Builds a gear vector in `lf, lb, rf, rb` order.
    pub const fn of(lf: i8, lb: i8, rf: i8, rb: i8) -> Self {
        Self { lf, lb, rf, rb }
    }

    /// Returns `true` when every wheel is in gear 0.
    pub fn is_stopped(&self) -> bool {
        *self == Self::STOPPED
    }
}

impl Default for GearState {
    fn default() -> Self {
        Self::STOPPED
    }
}

/// Locomotion mode recorded by the last commanded motion.
///
/// Speed commands behave differently depending on this mode: in
/// [`Mode::Straight`] they step all four gears by one, while in
/// [`Mode::Maneuvering`] they cancel the maneuver and snap to a canonical
/// gear vector (`{2,2,2,2}` for speed-up, all-stop for slow-down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Mode {
    /// Plain speed control along the current heading
    Straight,
    /// A discrete strafe/pivot maneuver is active
    Maneuvering,
}
