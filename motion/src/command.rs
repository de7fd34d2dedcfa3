// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Remote command definitions and serial byte mappings.
//!
//! This module defines the command set for rover control and provides
//! the mapping from single-byte serial commands to maneuvers. The remote
//! sends plain ASCII over the Bluetooth serial link, one byte per command,
//! with no framing or acknowledgement.
//!
//! # Remote Key Layout
//!
//! The vocabulary mirrors a WASD keyboard layout on the phone app:
//!
//! ```text
//!   [ q ][ w ][ e ]   q - Strafe left-forward
//!   [ a ][ s ][ d ]   w - Speed up       e - Strafe right-forward
//!                     a - Pivot left     s - Slow down    d - Pivot right
//!
//!   [ 8 ]  Arm the patrol oscillation
//!   [ h ]  Choreographed dance
//! ```
//!
//! Any other byte is treated as a stop request, so an out-of-vocabulary
//! sender can never leave the rover moving.

use defmt::Format;

/// Rover maneuver commands.
///
/// Represents all actions the rover can perform, including speed steps
/// along the current heading, discrete strafe/pivot maneuvers and the
/// scripted behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Command {
    /// Step all gears up by one, or cancel a maneuver into forward cruise
    SpeedUp,
    /// Step all gears down by one, or cancel a maneuver into a stop
    SlowDown,
    /// Strafe diagonally left-forward
    StrafeLeft,
    /// Strafe diagonally right-forward
    StrafeRight,
    /// Pivot in place, counter-clockwise
    PivotLeft,
    /// Pivot in place, clockwise
    PivotRight,
    /// Arm the timed patrol oscillation
    Patrol,
    /// Run the choreographed dance sequence
    Dance,
    /// Unrecognized byte; resolves to a stop
    Unknown,
}

impl Command {
    /// Converts a received serial byte to a rover command.
    ///
    /// Unknown bytes map to `Command::Unknown`, which the controller
    /// executes as a stop.
    ///
    /// # Arguments
    ///
    /// * `byte` - raw byte received on the remote serial channel
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let cmd = Command::from_byte(b'w');
    /// assert_eq!(cmd, Command::SpeedUp);
    ///
    /// let unknown = Command::from_byte(b'?');
    /// assert_eq!(unknown, Command::Unknown);
    /// ```
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'w' => Command::SpeedUp,
            b's' => Command::SlowDown,
            b'q' => Command::StrafeLeft,
            b'e' => Command::StrafeRight,
            b'a' => Command::PivotLeft,
            b'd' => Command::PivotRight,
            b'8' => Command::Patrol,
            b'h' => Command::Dance,
            _ => Command::Unknown,
        }
    }
}
