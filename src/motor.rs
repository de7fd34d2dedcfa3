// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Four-wheel motor bank for the H-bridge driver board.
//!
//! This module implements the motion core's [`MotorBus`] on real hardware:
//! one PWM channel per wheel for speed, and two GPIO direction lines per
//! wheel (AIN1/AIN2 style) driven from the combined direction word. The
//! wiring follows the direction-word bit layout in [`motion::drive`], so a
//! single `write_direction` settles all eight lines.
//!
//! # Hardware Interface
//!
//! - 4 PWM channels, one per wheel, 16-bit duty resolution
//! - 8 GPIO pins for H-bridge direction control (2 per wheel)
//!
//! The motor driver needs a short settle time after each update; `pause`
//! provides it as a blocking delay so a refresh always completes before
//! the dispatch loop looks at the next command.

use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Pwm, SetDutyCycle};
use embassy_time::block_for;
use motion::{MotorBus, Wheel};

use crate::config::DELAY_UNIT;

/// PWM and direction outputs for all four wheel motors.
///
/// The controller never enables a wheel's forward and backward lines at
/// the same time: each wheel's pair is driven from one direction-word bit
/// pair in which exactly one bit is set.
pub struct MotorBank {
    /// Left-front wheel PWM
    pwm_lf: Pwm<'static>,
    /// Left-back wheel PWM
    pwm_lb: Pwm<'static>,
    /// Right-front wheel PWM
    pwm_rf: Pwm<'static>,
    /// Right-back wheel PWM
    pwm_rb: Pwm<'static>,
    /// Direction line pairs, `(forward, backward)` per wheel
    lf_dir: (Output<'static>, Output<'static>),
    lb_dir: (Output<'static>, Output<'static>),
    rf_dir: (Output<'static>, Output<'static>),
    rb_dir: (Output<'static>, Output<'static>),
}

impl MotorBank {
    /// Creates a motor bank from the per-wheel PWMs and direction pairs.
    ///
    /// Direction pairs are `(forward, backward)`. All outputs should start
    /// low with PWM compare at 0 so the rover powers up stopped.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pwm_lf: Pwm<'static>,
        pwm_lb: Pwm<'static>,
        pwm_rf: Pwm<'static>,
        pwm_rb: Pwm<'static>,
        lf_dir: (Output<'static>, Output<'static>),
        lb_dir: (Output<'static>, Output<'static>),
        rf_dir: (Output<'static>, Output<'static>),
        rb_dir: (Output<'static>, Output<'static>),
    ) -> Self {
        Self {
            pwm_lf,
            pwm_lb,
            pwm_rf,
            pwm_rb,
            lf_dir,
            lb_dir,
            rf_dir,
            rb_dir,
        }
    }
}

/// Drives one H-bridge line pair from the wheel's direction-word bits.
fn set_pair(pair: &mut (Output<'static>, Output<'static>), word: u32, wheel: Wheel) {
    if word & wheel.forward_bit() != 0 {
        pair.0.set_high();
    } else {
        pair.0.set_low();
    }
    if word & wheel.backward_bit() != 0 {
        pair.1.set_high();
    } else {
        pair.1.set_low();
    }
}

impl MotorBus for MotorBank {
    fn write_direction(&mut self, word: u32) {
        set_pair(&mut self.lf_dir, word, Wheel::LeftFront);
        set_pair(&mut self.lb_dir, word, Wheel::LeftBack);
        set_pair(&mut self.rf_dir, word, Wheel::RightFront);
        set_pair(&mut self.rb_dir, word, Wheel::RightBack);
    }

    fn write_duty(&mut self, wheel: Wheel, duty: u16) {
        // Fire-and-forget, like every other motor write
        match wheel {
            Wheel::LeftFront => self.pwm_lf.set_duty_cycle(duty).ok(),
            Wheel::LeftBack => self.pwm_lb.set_duty_cycle(duty).ok(),
            Wheel::RightFront => self.pwm_rf.set_duty_cycle(duty).ok(),
            Wheel::RightBack => self.pwm_rb.set_duty_cycle(duty).ok(),
        };
    }

    fn pause(&mut self, units: u32) {
        block_for(DELAY_UNIT * units);
    }
}
