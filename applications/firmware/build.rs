//! Build script for the ESP32 firmware
//!
//! This script runs at build time to:
//! - Check that exactly one board feature is enabled
//! - Pass the esp-hal linker script to the linker

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let boards = ["DEVKIT_C6", "DEVKIT_S3"];
    let enabled: Vec<&str> = boards
        .iter()
        .copied()
        .filter(|board| std::env::var_os(format!("CARGO_FEATURE_{board}")).is_some())
        .collect();

    match enabled.as_slice() {
        [board] => {
            println!(
                "cargo:warning=Building firmware for {}",
                board.to_lowercase().replace('_', "-")
            );
        }
        [] => panic!("no board selected, enable one of the `devkit-*` features"),
        _ => panic!("more than one board feature enabled: {enabled:?}"),
    }

    // esp-hal's linker script pulls in the memory layout for the chip
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}
