// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Rover maneuver state machine and command execution.
//!
//! This module implements the main motion controller, managing:
//! - The four-wheel gear vector
//! - The straight/maneuvering locomotion mode
//! - The patrol countdown shared with the idle loop
//! - Command execution, including the blocking dance script
//!
//! # Speed control
//!
//! In [`Mode::Straight`] a speed command steps all four gears by one,
//! saturating at the `[-3, 3]` envelope. In [`Mode::Maneuvering`] the same
//! command first cancels the maneuver: speed-up snaps to forward cruise
//! (`{2,2,2,2}`), slow-down snaps to a full stop. The asymmetry of those
//! two snap targets is deliberate.
//!
//! # Mutation discipline
//!
//! Every maneuver funnels through [`MotionController::set_gear`], so each
//! gear change is immediately followed by a motor-output refresh and the
//! hardware can never lag behind the model.

use crate::command::Command;
use crate::drive::{refresh, MotorBus};
use crate::gear::{GearState, Mode, GEAR_MAX, GEAR_MIN};

/// Gear snapped to by a speed-up that cancels a maneuver ("forward, 2").
const CRUISE_GEAR: i8 = 2;

/// Patrol countdown value armed by the patrol command.
pub const PATROL_INIT: u32 = 432;

/// Patrol countdown boundary between the two strafe legs.
pub const PATROL_SPLIT: u32 = 182;

/// Delay units held between dance steps; short holds use half of this.
const DANCE_HOLD: u32 = 100;

/// Rover motion controller.
///
/// Owns all mutable motion state. The firmware creates exactly one and
/// feeds it commands and patrol ticks from a single dispatch loop, so each
/// command runs to completion before the next one is looked at.
pub struct MotionController {
    /// Current per-wheel gear vector
    gears: GearState,
    /// Whether the last commanded motion was straight or a maneuver
    mode: Mode,
    /// Patrol countdown; zero means the patrol is idle
    patrol: u32,
}

impl MotionController {
    /// Creates a controller with all wheels stopped and the patrol idle.
    ///
    /// No hardware write happens here; the first maneuver (or an explicit
    /// stop) performs the first output refresh.
    pub fn new() -> Self {
        Self {
            gears: GearState::STOPPED,
            mode: Mode::Straight,
            patrol: 0,
        }
    }

    /// Returns the current gear vector.
    pub fn gears(&self) -> GearState {
        self.gears
    }

    /// Returns the current locomotion mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the remaining patrol ticks (zero when idle).
    pub fn patrol_remaining(&self) -> u32 {
        self.patrol
    }

    /// Assigns the four gears and immediately refreshes the motor outputs.
    ///
    /// The sole mutation path for the gear vector: there is deliberately no
    /// way to change a gear without the hardware update that follows it.
    fn set_gear(&mut self, bus: &mut impl MotorBus, lf: i8, lb: i8, rf: i8, rb: i8) {
        self.gears = GearState::of(lf, lb, rf, rb);
        refresh(bus, &mut self.gears);
    }

    /// Steps all gears up by one, saturating at the top gear.
    ///
    /// When a maneuver is active this instead cancels it and snaps to
    /// forward cruise (`{2,2,2,2}`).
    pub fn speed_up(&mut self, bus: &mut impl MotorBus) {
        if self.mode != Mode::Straight {
            self.mode = Mode::Straight;
            self.set_gear(bus, CRUISE_GEAR, CRUISE_GEAR, CRUISE_GEAR, CRUISE_GEAR);
        } else {
            let GearState { lf, lb, rf, rb } = self.gears;
            self.set_gear(
                bus,
                (lf + 1).min(GEAR_MAX),
                (lb + 1).min(GEAR_MAX),
                (rf + 1).min(GEAR_MAX),
                (rb + 1).min(GEAR_MAX),
            );
        }
    }

    /// Steps all gears down by one, saturating at the bottom gear.
    ///
    /// When a maneuver is active this instead cancels it into a full stop.
    pub fn slow_down(&mut self, bus: &mut impl MotorBus) {
        if self.mode != Mode::Straight {
            self.mode = Mode::Straight;
            self.set_gear(bus, 0, 0, 0, 0);
        } else {
            let GearState { lf, lb, rf, rb } = self.gears;
            self.set_gear(
                bus,
                (lf - 1).max(GEAR_MIN),
                (lb - 1).max(GEAR_MIN),
                (rf - 1).max(GEAR_MIN),
                (rb - 1).max(GEAR_MIN),
            );
        }
    }

    /// Strafes diagonally left-forward.
    pub fn strafe_left(&mut self, bus: &mut impl MotorBus) {
        self.mode = Mode::Maneuvering;
        self.set_gear(bus, 0, 1, 3, 3);
    }

    /// Strafes diagonally right-forward.
    pub fn strafe_right(&mut self, bus: &mut impl MotorBus) {
        self.mode = Mode::Maneuvering;
        self.set_gear(bus, 3, 3, 0, 1);
    }

    /// Pivots in place, clockwise.
    pub fn pivot_right(&mut self, bus: &mut impl MotorBus) {
        self.mode = Mode::Maneuvering;
        self.set_gear(bus, 2, 2, -2, -2);
    }

    /// Pivots in place, counter-clockwise.
    pub fn pivot_left(&mut self, bus: &mut impl MotorBus) {
        self.mode = Mode::Maneuvering;
        self.set_gear(bus, -2, -2, 2, 2);
    }

    /// Stops all wheels and returns to straight mode.
    pub fn stop(&mut self, bus: &mut impl MotorBus) {
        self.mode = Mode::Straight;
        self.set_gear(bus, 0, 0, 0, 0);
    }

    /// Arms the patrol countdown.
    ///
    /// Overwrites the counter unconditionally and changes no gear; the
    /// motion happens tick by tick in [`MotionController::patrol_tick`].
    pub fn arm_patrol(&mut self) {
        self.patrol = PATROL_INIT;
    }

    /// Runs the choreographed dance sequence.
    ///
    /// Blocks the caller for the whole script: three speed-ups, six
    /// slow-downs and a left-right-left pivot shuffle, with timed holds
    /// between steps, ending in a full stop whatever the starting state.
    /// The dispatch loop intentionally takes no other command while this
    /// runs.
    pub fn dance(&mut self, bus: &mut impl MotorBus) {
        self.speed_up(bus);
        self.speed_up(bus);
        self.speed_up(bus);
        bus.pause(DANCE_HOLD);
        for _ in 0..6 {
            self.slow_down(bus);
        }
        bus.pause(DANCE_HOLD);
        self.pivot_left(bus);
        bus.pause(DANCE_HOLD / 2);
        self.pivot_right(bus);
        bus.pause(DANCE_HOLD);
        self.pivot_left(bus);
        bus.pause(DANCE_HOLD / 2);
        self.stop(bus);
    }

    /// Executes one decoded remote command.
    ///
    /// Every command except [`Command::Patrol`] first cancels any running
    /// patrol, so a remote key always takes over from the idle behavior.
    /// The patrol command itself only (re)arms the countdown; it never
    /// needs the cancel because arming overwrites the counter anyway.
    /// Unrecognized input resolves to a stop.
    pub fn execute(&mut self, bus: &mut impl MotorBus, command: Command) {
        if command == Command::Patrol {
            self.arm_patrol();
            return;
        }

        // Any other key takes over from a running patrol
        self.patrol = 0;
        match command {
            Command::SpeedUp => self.speed_up(bus),
            Command::SlowDown => self.slow_down(bus),
            Command::StrafeLeft => self.strafe_left(bus),
            Command::StrafeRight => self.strafe_right(bus),
            Command::PivotLeft => self.pivot_left(bus),
            Command::PivotRight => self.pivot_right(bus),
            Command::Dance => self.dance(bus),
            // Fail-safe default for anything unrecognized
            _ => self.stop(bus),
        }
    }

    /// Advances the patrol oscillation by one idle tick.
    ///
    /// Counting down from 432: values at or above the 182 boundary strafe
    /// right-forward, values below it strafe left-forward, and the tick
    /// that lands on zero rearms the counter so the oscillation repeats
    /// until a remote command cancels it. Does nothing while the counter
    /// is zero.
    pub fn patrol_tick(&mut self, bus: &mut impl MotorBus) {
        if self.patrol >= PATROL_SPLIT {
            self.strafe_right(bus);
            self.patrol -= 1;
        } else if self.patrol > 0 {
            self.strafe_left(bus);
            self.patrol -= 1;
            if self.patrol == 0 {
                self.patrol = PATROL_INIT;
            }
        }
    }
}

/// Provides default initialization for `MotionController`.
impl Default for MotionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::drive::mock::MockBus;
    use crate::drive::{Wheel, DUTY_LOW, DUTY_MAX};
    use std::vec;

    fn controller() -> (MotionController, MockBus) {
        (MotionController::new(), MockBus::new())
    }

    #[test]
    fn straight_speed_steps_saturate_at_the_envelope() {
        let (mut ctl, mut bus) = controller();

        for _ in 0..5 {
            ctl.speed_up(&mut bus);
        }
        assert_eq!(ctl.gears(), GearState::of(3, 3, 3, 3));
        assert_eq!(ctl.mode(), Mode::Straight);

        for _ in 0..10 {
            ctl.slow_down(&mut bus);
        }
        assert_eq!(ctl.gears(), GearState::of(-3, -3, -3, -3));
        assert_eq!(ctl.mode(), Mode::Straight);
    }

    #[test]
    fn three_speed_ups_from_rest_reach_top_gear() {
        let (mut ctl, mut bus) = controller();

        for _ in 0..3 {
            ctl.execute(&mut bus, Command::SpeedUp);
        }

        assert_eq!(ctl.gears(), GearState::of(3, 3, 3, 3));
        assert_eq!(ctl.mode(), Mode::Straight);
    }

    #[test]
    fn maneuvers_set_their_gear_vectors_and_mode() {
        let (mut ctl, mut bus) = controller();

        ctl.strafe_left(&mut bus);
        assert_eq!(ctl.gears(), GearState::of(0, 1, 3, 3));
        assert_eq!(ctl.mode(), Mode::Maneuvering);

        ctl.strafe_right(&mut bus);
        assert_eq!(ctl.gears(), GearState::of(3, 3, 0, 1));

        ctl.pivot_right(&mut bus);
        assert_eq!(ctl.gears(), GearState::of(2, 2, -2, -2));

        ctl.pivot_left(&mut bus);
        assert_eq!(ctl.gears(), GearState::of(-2, -2, 2, 2));
        assert_eq!(ctl.mode(), Mode::Maneuvering);

        ctl.stop(&mut bus);
        assert_eq!(ctl.gears(), GearState::STOPPED);
        assert_eq!(ctl.mode(), Mode::Straight);
    }

    #[test]
    fn speed_up_cancels_a_maneuver_into_forward_cruise() {
        let (mut ctl, mut bus) = controller();

        for _ in 0..3 {
            ctl.execute(&mut bus, Command::SpeedUp);
        }
        ctl.execute(&mut bus, Command::StrafeLeft);
        assert_eq!(ctl.gears(), GearState::of(0, 1, 3, 3));
        assert_eq!(ctl.mode(), Mode::Maneuvering);

        ctl.execute(&mut bus, Command::SpeedUp);
        assert_eq!(ctl.gears(), GearState::of(2, 2, 2, 2));
        assert_eq!(ctl.mode(), Mode::Straight);
    }

    #[test]
    fn slow_down_cancels_a_maneuver_into_a_stop() {
        let (mut ctl, mut bus) = controller();

        ctl.execute(&mut bus, Command::PivotRight);
        ctl.execute(&mut bus, Command::SlowDown);

        assert_eq!(ctl.gears(), GearState::STOPPED);
        assert_eq!(ctl.mode(), Mode::Straight);
    }

    #[test]
    fn unknown_input_resolves_to_a_stop() {
        let (mut ctl, mut bus) = controller();

        ctl.execute(&mut bus, Command::SpeedUp);
        ctl.execute(&mut bus, Command::from_byte(b'z'));

        assert_eq!(ctl.gears(), GearState::STOPPED);
        assert_eq!(ctl.mode(), Mode::Straight);
    }

    #[test]
    fn patrol_command_arms_the_counter_without_moving() {
        let (mut ctl, mut bus) = controller();

        ctl.execute(&mut bus, Command::Patrol);

        assert_eq!(ctl.patrol_remaining(), PATROL_INIT);
        assert_eq!(ctl.gears(), GearState::STOPPED);
        assert!(bus.ops.is_empty());
    }

    #[test]
    fn patrol_cycle_is_periodic_over_432_ticks() {
        let (mut ctl, mut bus) = controller();
        ctl.arm_patrol();

        // Right-forward leg down to the boundary
        for _ in 0..250 {
            ctl.patrol_tick(&mut bus);
        }
        assert_eq!(ctl.patrol_remaining(), PATROL_SPLIT);
        assert_eq!(ctl.gears(), GearState::of(3, 3, 0, 1));

        // Left-forward leg down to zero, which rearms
        for _ in 0..182 {
            ctl.patrol_tick(&mut bus);
        }
        assert_eq!(ctl.patrol_remaining(), PATROL_INIT);
        assert_eq!(ctl.gears(), GearState::of(0, 1, 3, 3));
    }

    #[test]
    fn patrol_tick_is_a_no_op_while_idle() {
        let (mut ctl, mut bus) = controller();

        ctl.patrol_tick(&mut bus);

        assert_eq!(ctl.patrol_remaining(), 0);
        assert!(bus.ops.is_empty());
    }

    #[test]
    fn every_command_but_patrol_cancels_the_countdown() {
        let commands = [
            Command::SpeedUp,
            Command::SlowDown,
            Command::StrafeLeft,
            Command::StrafeRight,
            Command::PivotLeft,
            Command::PivotRight,
            Command::Dance,
            Command::Unknown,
        ];

        for command in commands {
            let (mut ctl, mut bus) = controller();
            ctl.arm_patrol();
            ctl.patrol_tick(&mut bus);
            assert_ne!(ctl.patrol_remaining(), 0);

            ctl.execute(&mut bus, command);
            assert_eq!(ctl.patrol_remaining(), 0, "{:?} left the patrol armed", command);
        }
    }

    #[test]
    fn dance_ends_stopped_from_any_starting_state() {
        // From rest
        let (mut ctl, mut bus) = controller();
        ctl.execute(&mut bus, Command::Dance);
        assert!(ctl.gears().is_stopped());
        assert_eq!(ctl.mode(), Mode::Straight);

        // From a maneuver at speed
        let (mut ctl, mut bus) = controller();
        ctl.execute(&mut bus, Command::StrafeRight);
        ctl.execute(&mut bus, Command::Dance);
        assert!(ctl.gears().is_stopped());
        assert_eq!(ctl.mode(), Mode::Straight);
    }

    #[test]
    fn dance_holds_follow_the_fixed_schedule() {
        let (mut ctl, mut bus) = controller();

        ctl.dance(&mut bus);

        assert_eq!(bus.holds(), vec![100, 100, 50, 100, 50]);
    }

    #[test]
    fn every_gear_write_refreshes_the_outputs() {
        let (mut ctl, mut bus) = controller();

        ctl.execute(&mut bus, Command::StrafeRight);

        assert_eq!(bus.last_direction(), Some(0xE4));
        assert_eq!(bus.last_duty(Wheel::LeftFront), Some(DUTY_MAX));
        assert_eq!(bus.last_duty(Wheel::RightBack), Some(DUTY_LOW));
    }
}
