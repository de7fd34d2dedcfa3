// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Gear-to-output translation for the motor driver board.
//!
//! The driver exposes one combined direction word plus an independent PWM
//! duty channel per wheel. This module maps the current [`GearState`] onto
//! those outputs: the gear sign picks each wheel's forward/backward bits in
//! the direction word, the gear magnitude selects one of four fixed duty
//! tiers. The motor driver needs a short settle time after every register
//! write, so each write is followed by one [`MotorBus::pause`] unit.
//!
//! # Duty tiers
//!
//! Magnitude 0..3 maps to 0, 3/8, 3/4 and full duty of the 16-bit PWM range.
//! Magnitudes outside `[0, 3]` are saturated here as a backstop, even though
//! the maneuver layer already clamps its own arithmetic.

use crate::gear::{GearState, GEAR_MAX, GEAR_MIN};
use defmt::Format;

/// Full-scale PWM duty (gear magnitude 3).
pub const DUTY_MAX: u16 = 65535;

/// Mid duty tier, 3/4 of full scale (gear magnitude 2).
pub const DUTY_MID: u16 = 49152;

/// Lowest nonzero duty tier, 3/8 of full scale (gear magnitude 1).
pub const DUTY_LOW: u16 = 24576;

/// One wheel of the drive train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Wheel {
    /// Left-front wheel
    LeftFront,
    /// Left-back wheel
    LeftBack,
    /// Right-front wheel
    RightFront,
    /// Right-back wheel
    RightBack,
}

impl Wheel {
    /// Direction-word bit that drives this wheel forward.
    ///
    /// The bit layout is fixed by the motor driver wiring and must not be
    /// rearranged.
    pub const fn forward_bit(self) -> u32 {
        match self {
            Wheel::LeftFront => 0x0000_0004,
            Wheel::LeftBack => 0x0000_0040,
            Wheel::RightFront => 0x0000_0080,
            Wheel::RightBack => 0x0000_0020,
        }
    }

    /// Direction-word bit that drives this wheel backward.
    pub const fn backward_bit(self) -> u32 {
        match self {
            Wheel::LeftFront => 0x0000_0001,
            Wheel::LeftBack => 0x0000_0008,
            Wheel::RightFront => 0x0000_0002,
            Wheel::RightBack => 0x0000_0010,
        }
    }
}

/// Output interface to the motor driver, provided by the firmware.
///
/// One combined direction write, one duty write per wheel, and a bounded
/// settle/hold delay measured in hardware delay units. Writes are
/// fire-and-forget; the driver gives no feedback path.
pub trait MotorBus {
    /// Writes the combined direction word for all four wheels.
    fn write_direction(&mut self, word: u32);

    /// Writes one wheel's PWM duty value to its own output channel.
    fn write_duty(&mut self, wheel: Wheel, duty: u16);

    /// Busy-waits for `units` hardware delay units.
    fn pause(&mut self, units: u32);
}

/// Maps a gear value to its PWM duty tier.
///
/// Total over all of `i8`: magnitudes above 3 saturate to the full-scale
/// tier rather than being rejected.
pub fn duty_for(gear: i8) -> u16 {
    match gear.unsigned_abs() {
        0 => 0,
        1 => DUTY_LOW,
        2 => DUTY_MID,
        _ => DUTY_MAX,
    }
}

/// Builds the combined direction word from the gear signs.
///
/// A wheel in gear 0 keeps its forward bit, matching the driver's idle
/// convention (duty 0 makes the direction moot).
pub fn direction_word(gears: &GearState) -> u32 {
    let mut word = 0;
    word |= bit_for(Wheel::RightFront, gears.rf);
    word |= bit_for(Wheel::RightBack, gears.rb);
    word |= bit_for(Wheel::LeftFront, gears.lf);
    word |= bit_for(Wheel::LeftBack, gears.lb);
    word
}

fn bit_for(wheel: Wheel, gear: i8) -> u32 {
    if gear >= 0 {
        wheel.forward_bit()
    } else {
        wheel.backward_bit()
    }
}

/// Pushes the current gear state to the motor outputs.
///
/// Saturates any out-of-range gear back into `[-3, 3]`, writes the direction
/// word, then each wheel's duty on its own channel. Every write is followed
/// by one settle unit; the whole refresh completes before returning, so the
/// caller never interleaves two output updates.
pub fn refresh(bus: &mut impl MotorBus, gears: &mut GearState) {
    gears.lf = gears.lf.clamp(GEAR_MIN, GEAR_MAX);
    gears.lb = gears.lb.clamp(GEAR_MIN, GEAR_MAX);
    gears.rf = gears.rf.clamp(GEAR_MIN, GEAR_MAX);
    gears.rb = gears.rb.clamp(GEAR_MIN, GEAR_MAX);

    bus.write_direction(direction_word(gears));
    bus.pause(1);
    bus.write_duty(Wheel::RightFront, duty_for(gears.rf));
    bus.pause(1);
    bus.write_duty(Wheel::LeftBack, duty_for(gears.lb));
    bus.pause(1);
    bus.write_duty(Wheel::LeftFront, duty_for(gears.lf));
    bus.pause(1);
    bus.write_duty(Wheel::RightBack, duty_for(gears.rb));
    bus.pause(1);
}

/// Recording bus used by the unit tests in this crate.
#[cfg(test)]
pub(crate) mod mock {
    extern crate std;

    use super::{MotorBus, Wheel};
    use std::vec::Vec;

    /// One recorded bus operation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BusOp {
        Direction(u32),
        Duty(Wheel, u16),
        Pause(u32),
    }

    /// `MotorBus` that records every operation instead of driving hardware.
    #[derive(Default)]
    pub struct MockBus {
        pub ops: Vec<BusOp>,
    }

    impl MockBus {
        pub fn new() -> Self {
            Self::default()
        }

        /// Most recent direction word written, if any.
        pub fn last_direction(&self) -> Option<u32> {
            self.ops.iter().rev().find_map(|op| match op {
                BusOp::Direction(word) => Some(*word),
                _ => None,
            })
        }

        /// Most recent duty written for `wheel`, if any.
        pub fn last_duty(&self, wheel: Wheel) -> Option<u16> {
            self.ops.iter().rev().find_map(|op| match op {
                BusOp::Duty(w, duty) if *w == wheel => Some(*duty),
                _ => None,
            })
        }

        /// Pauses longer than a single settle unit, i.e. maneuver holds.
        pub fn holds(&self) -> Vec<u32> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    BusOp::Pause(units) if *units > 1 => Some(*units),
                    _ => None,
                })
                .collect()
        }
    }

    impl MotorBus for MockBus {
        fn write_direction(&mut self, word: u32) {
            self.ops.push(BusOp::Direction(word));
        }

        fn write_duty(&mut self, wheel: Wheel, duty: u16) {
            self.ops.push(BusOp::Duty(wheel, duty));
        }

        fn pause(&mut self, units: u32) {
            self.ops.push(BusOp::Pause(units));
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::mock::{BusOp, MockBus};
    use super::*;
    use std::vec;

    #[test]
    fn duty_lookup_is_total_and_tiered() {
        assert_eq!(duty_for(0), 0);
        assert_eq!(duty_for(1), DUTY_LOW);
        assert_eq!(duty_for(2), DUTY_MID);
        assert_eq!(duty_for(3), DUTY_MAX);
        // Mirrored for reverse gears
        assert_eq!(duty_for(-1), DUTY_LOW);
        assert_eq!(duty_for(-2), DUTY_MID);
        assert_eq!(duty_for(-3), DUTY_MAX);
    }

    #[test]
    fn duty_lookup_saturates_out_of_range() {
        assert_eq!(duty_for(4), DUTY_MAX);
        assert_eq!(duty_for(-5), DUTY_MAX);
        assert_eq!(duty_for(i8::MAX), DUTY_MAX);
        assert_eq!(duty_for(i8::MIN), DUTY_MAX);
    }

    #[test]
    fn duty_tiers_keep_three_quarter_and_three_eighth_ratios() {
        assert_eq!(DUTY_MID as u32, 3 * 65536 / 4);
        assert_eq!(DUTY_LOW as u32, 3 * 65536 / 8);
    }

    #[test]
    fn direction_word_all_forward() {
        assert_eq!(direction_word(&GearState::of(2, 2, 2, 2)), 0xE4);
        // Gear 0 counts as forward
        assert_eq!(direction_word(&GearState::STOPPED), 0xE4);
    }

    #[test]
    fn direction_word_all_backward() {
        assert_eq!(direction_word(&GearState::of(-1, -2, -3, -1)), 0x1B);
    }

    #[test]
    fn direction_word_pivot_left() {
        // Left side reverses, right side drives forward
        let word = direction_word(&GearState::of(-2, -2, 2, 2));
        assert_eq!(
            word,
            Wheel::LeftFront.backward_bit()
                | Wheel::LeftBack.backward_bit()
                | Wheel::RightFront.forward_bit()
                | Wheel::RightBack.forward_bit()
        );
    }

    #[test]
    fn refresh_saturates_stored_gears() {
        let mut bus = MockBus::new();
        let mut gears = GearState::of(5, -9, 0, 1);

        refresh(&mut bus, &mut gears);

        assert_eq!(gears, GearState::of(3, -3, 0, 1));
        assert_eq!(bus.last_duty(Wheel::LeftFront), Some(DUTY_MAX));
        assert_eq!(bus.last_duty(Wheel::LeftBack), Some(DUTY_MAX));
        assert_eq!(bus.last_duty(Wheel::RightFront), Some(0));
        assert_eq!(bus.last_duty(Wheel::RightBack), Some(DUTY_LOW));
    }

    #[test]
    fn refresh_writes_direction_then_duties_with_settle_pauses() {
        let mut bus = MockBus::new();
        let mut gears = GearState::of(0, 1, 3, 3);

        refresh(&mut bus, &mut gears);

        assert_eq!(
            bus.ops,
            vec![
                BusOp::Direction(0xE4),
                BusOp::Pause(1),
                BusOp::Duty(Wheel::RightFront, DUTY_MAX),
                BusOp::Pause(1),
                BusOp::Duty(Wheel::LeftBack, DUTY_LOW),
                BusOp::Pause(1),
                BusOp::Duty(Wheel::LeftFront, 0),
                BusOp::Pause(1),
                BusOp::Duty(Wheel::RightBack, DUTY_MAX),
                BusOp::Pause(1),
            ]
        );
    }
}
