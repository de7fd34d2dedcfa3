// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Hardware configuration constants for the RP2350A rover.
//!
//! This module defines the tunables that are not tied to a concrete
//! peripheral type:
//! - Bluetooth serial parameters
//! - PWM configuration parameters
//! - Dispatch loop timing
//!
//! # Pin Mapping Summary
//!
//! ## Motors (per-wheel PWM + two H-bridge direction lines)
//! - **Left-Front**: PWM GPIO 16 (PWM_SLICE0 A), fwd GPIO 6, back GPIO 7
//! - **Left-Back**: PWM GPIO 18 (PWM_SLICE1 A), fwd GPIO 8, back GPIO 9
//! - **Right-Front**: PWM GPIO 20 (PWM_SLICE2 A), fwd GPIO 10, back GPIO 11
//! - **Right-Back**: PWM GPIO 22 (PWM_SLICE3 A), fwd GPIO 12, back GPIO 13
//!
//! ## Remote
//! - **Bluetooth serial (HC-05)**: UART1, TX GPIO 4, RX GPIO 5
//!
//! ## Indicators
//! - **Status LED**: GPIO 25 (onboard LED)

use embassy_time::Duration;

/// Baud rate of the Bluetooth serial module (HC-05 factory default)
pub const BT_BAUD_RATE: u32 = 9600;

/// PWM top value for 16-bit resolution (maximum duty cycle)
pub const PWM_TOP: u16 = 65535;

/// Initial PWM compare value (starts at 0, motors stopped)
pub const PWM_INITIAL_COMPARE: u16 = 0;

/// Depth of the decoded-command queue between the UART task and the
/// dispatch loop
pub const COMMAND_QUEUE_DEPTH: usize = 8;

/// Command silence after which the dispatch loop runs one patrol tick
pub const PATROL_TICK: Duration = Duration::from_millis(10);

/// One motor-driver delay unit: settle time after a register write, and
/// the base unit of the dance holds
pub const DELAY_UNIT: Duration = Duration::from_millis(5);
