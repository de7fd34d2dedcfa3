// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350A Mecanum Rover with Bluetooth Remote
//!
//! This firmware drives a four-wheel mecanum rover from single-byte
//! commands received over a Bluetooth serial link, using the Embassy async
//! runtime. All motion logic lives in the hardware-free `motion` crate;
//! this binary wires it to the UART, the motor bank and the status LED.
//!
//! # Hardware Configuration
//! - **Microcontroller**: RP2350A (ARM Cortex-M33)
//! - **Motors**: Four DC motors with H-bridge drivers
//!   - Left-front: PWM GPIO 16, direction GPIO 6/7
//!   - Left-back: PWM GPIO 18, direction GPIO 8/9
//!   - Right-front: PWM GPIO 20, direction GPIO 10/11
//!   - Right-back: PWM GPIO 22, direction GPIO 12/13
//! - **Bluetooth serial**: HC-05 module on UART1 (TX GPIO 4, RX GPIO 5)
//! - **Status LED**: GPIO 25
//!
//! # Remote Commands
//! - `w`/`s`: speed up / slow down along the current heading
//! - `q`/`e`: strafe left-forward / right-forward
//! - `a`/`d`: pivot left / right in place
//! - `8`: arm the patrol oscillation
//! - `h`: choreographed dance
//! - anything else: stop
//!
//! # Control Flow
//! A UART task decodes bytes into commands and queues them; the main
//! dispatch loop owns the motion controller and the motor bank, executing
//! one command at a time and running a patrol tick whenever the remote is
//! silent. Commands therefore run to completion — including the blocking
//! dance — before the next one is taken.
//!
//! # Build
//! ```bash
//! cargo build --release -p mecabot --target thumbv8m.main-none-eabihf
//! ```

#![no_std]
#![no_main]

mod config;
mod motor;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{Async, Config as UartConfig, InterruptHandler as UartInterruptHandler, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_time::with_timeout;
use motion::{Command, MotionController};
use {defmt_rtt as _, panic_probe as _};

use config::{
    BT_BAUD_RATE, COMMAND_QUEUE_DEPTH, PATROL_TICK, PWM_INITIAL_COMPARE, PWM_TOP,
};
use motor::MotorBank;

bind_interrupts!(struct Irqs {
    UART1_IRQ => UartInterruptHandler<UART1>;
});

/// Boot ROM image definition, required in the first flash sector.
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Program metadata for picotool info command
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"Mecanum Rover"),
    embassy_rp::binary_info::rp_program_description!(c"RP2350A Rover with Bluetooth Remote"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Decoded commands queued from the UART task to the dispatch loop.
static COMMANDS: Channel<CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH> = Channel::new();

/// Reads remote bytes and queues decoded commands.
///
/// One byte per command, no framing. The LED toggles on every received
/// byte as a reception indicator. While the dispatch loop is busy (for
/// example inside the dance) bytes queue up to the channel depth and any
/// overflow is dropped rather than blocking the UART.
#[embassy_executor::task]
async fn remote_task(
    mut uart: Uart<'static, Async>,
    commands: Sender<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
    mut led: Output<'static>,
) {
    let mut buf = [0u8; 1];
    loop {
        if uart.read(&mut buf).await.is_err() {
            continue;
        }
        led.toggle();

        let command = Command::from_byte(buf[0]);
        info!("remote byte 0x{:02X} -> {}", buf[0], command);
        if commands.try_send(command).is_err() {
            info!("command queue full, dropping {}", command);
        }
    }
}

/// Main rover task.
///
/// Initializes all peripherals, spawns the UART task and runs the command
/// dispatch loop: execute each queued command to completion, and when the
/// remote stays silent for one tick period, advance the patrol.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RP2350A Mecanum Rover Starting!");
    let p = embassy_rp::init(Default::default());

    // Status LED on GPIO 25
    let led = Output::new(p.PIN_25, Level::Low);

    // Per-wheel PWM for motor speed control
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = PWM_INITIAL_COMPARE;
    pwm_config.compare_b = PWM_INITIAL_COMPARE;

    let pwm_lf = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config.clone());
    let pwm_lb = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, pwm_config.clone());
    let pwm_rf = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_20, pwm_config.clone());
    let pwm_rb = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_22, pwm_config.clone());

    // H-bridge direction line pairs, (forward, backward) per wheel
    let lf_dir = (
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
    );
    let lb_dir = (
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
    );
    let rf_dir = (
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
    );
    let rb_dir = (
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
    );

    let mut motors = MotorBank::new(
        pwm_lf, pwm_lb, pwm_rf, pwm_rb, lf_dir, lb_dir, rf_dir, rb_dir,
    );

    // Bluetooth serial module on UART1
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BT_BAUD_RATE;
    let uart = Uart::new(
        p.UART1,
        p.PIN_4, // TX -> HC-05 RXD
        p.PIN_5, // RX <- HC-05 TXD
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );

    spawner.must_spawn(remote_task(uart, COMMANDS.sender(), led));

    let mut controller = MotionController::new();
    // Push the all-stop state so the outputs start in a known configuration
    controller.stop(&mut motors);

    info!("Rover ready! Waiting for remote commands...");

    let receiver = COMMANDS.receiver();
    loop {
        match with_timeout(PATROL_TICK, receiver.receive()).await {
            Ok(command) => {
                controller.execute(&mut motors, command);
                info!(
                    "executed {}, gears {}, patrol {}",
                    command,
                    controller.gears(),
                    controller.patrol_remaining()
                );
            }
            // Remote is quiet; let the patrol advance one step
            Err(_) => controller.patrol_tick(&mut motors),
        }
    }
}
