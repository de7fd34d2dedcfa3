// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Motion control core for a four-wheel mecanum rover.
//!
//! This crate owns everything between a received command byte and the
//! direction/duty values pushed to the motor driver: the per-wheel gear
//! model, the gear-to-PWM translation, the maneuver library (including the
//! choreographed dance) and the patrol oscillation. It is deliberately
//! hardware-free: the firmware hands it a [`MotorBus`] implementation and
//! everything else is plain state-machine logic, which keeps the whole
//! crate testable on a host.
//!
//! # Architecture
//!
//! ```text
//! command byte ──> Command ──> MotionController ──> refresh() ──> MotorBus
//!                              (gears + mode +       direction word
//!                               patrol counter)      + 4 duty writes
//! ```

#![no_std]

pub mod command;
pub mod controller;
pub mod drive;
pub mod gear;

pub use command::Command;
pub use controller::MotionController;
pub use drive::{MotorBus, Wheel};
pub use gear::{GearState, Mode};
