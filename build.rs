// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Build script for the mecabot firmware.
//!
//! Copies the RP2350 memory layout (`memory.x`) into the build output
//! directory and puts it on the linker search path, so `cortex-m-rt`'s
//! `-Tlink.x` (set in `.cargo/config.toml`) can find it. Rebuilds when the
//! memory layout changes.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    // Get the output directory where cargo places build artifacts
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    // Copy memory.x to the output directory for the linker to find
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();

    // Tell cargo to add the output directory to the linker search path
    println!("cargo:rustc-link-search={}", out.display());

    // Rebuild if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
}
