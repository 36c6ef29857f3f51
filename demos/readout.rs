// SPDX-License-Identifier: MPL-2.0

//! Full thermostat readout.
//!
//! Connects to a thermostat, refreshes all readings, and prints them.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example readout -- <serial> <device_ip> [username] [password]
//! ```
//!
//! # Examples
//!
//! ```bash
//! # No auth
//! cargo run --example readout -- A1B2C3D4 192.168.1.50
//!
//! # With auth
//! cargo run --example readout -- A1B2C3D4 192.168.1.50 admin password
//! ```

use std::env;

use ternor_lib::Thermostat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <serial> <device_ip> [username] [password]", args[0]);
        std::process::exit(1);
    }

    let serial = &args[1];
    let device_ip = &args[2];

    println!("=== Thermostat Readout ===");
    println!("Device: {device_ip} (sn {serial})");
    println!();

    let mut builder = Thermostat::builder(serial, device_ip);

    if args.len() >= 5 {
        builder = builder.with_credentials(&args[3], &args[4]);
    }

    // Probes the device and detects the firmware line.
    let thermostat = builder.build().await?;
    println!("Firmware traits: {:?}", thermostat.firmware());

    let state = thermostat.update().await?;

    match state.temperature() {
        Some(celsius) => println!("Floor temperature: {celsius:.1} °C"),
        None => println!("Floor temperature: not available"),
    }
    match state.setpoint() {
        Some(celsius) => println!("Setpoint:          {celsius:.1} °C"),
        None => println!("Setpoint:          not available"),
    }
    match state.mode() {
        Some(mode) => println!("Mode:              {mode}"),
        None => println!("Mode:              not available"),
    }
    match state.relay() {
        Some(true) => println!("Relay:             heating"),
        Some(false) => println!("Relay:             idle"),
        None => println!("Relay:             not available"),
    }

    Ok(())
}
