//! Build script for cadence-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates clock.toml at compile time
//! - Generates board_config.rs from the validated values

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Validated board configuration
struct BoardConfig {
    tick_ms: i64,
    watchdog_timeout_ms: i64,
    bed_fitted: bool,
    psu_active_low: bool,
    telemetry_baudrate: i64,
    intercom_baudrate: i64,
}

fn main() {
    setup_linker();
    let config = validate_config();
    generate_board_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml configuration at compile time
fn validate_config() -> BoardConfig {
    // Re-run if clock.toml changes
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a clock.toml board configuration file.    ║\n\
            ║  Please create one in the cadence-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let tick_ms = match integer(&config, "clock", "tick_ms") {
        Some(ms) if (1..=100).contains(&ms) => ms,
        Some(_) => {
            errors.push("[clock] tick_ms must be 1-100".to_string());
            0
        }
        None => {
            errors.push("[clock] missing 'tick_ms'".to_string());
            0
        }
    };

    // At least two 10ms service intervals, at most the RP2040 counter range
    let watchdog_timeout_ms = match integer(&config, "watchdog", "timeout_ms") {
        Some(ms) if (20..=8300).contains(&ms) => ms,
        Some(_) => {
            errors.push("[watchdog] timeout_ms must be 20-8300".to_string());
            0
        }
        None => {
            errors.push("[watchdog] missing 'timeout_ms'".to_string());
            0
        }
    };

    let telemetry_baudrate = baudrate(&config, "telemetry", &mut errors);
    let intercom_baudrate = baudrate(&config, "intercom", &mut errors);

    let bed_fitted = boolean(&config, "heater", "bed", &mut errors).unwrap_or(true);
    let psu_active_low = boolean(&config, "psu", "active_low", &mut errors).unwrap_or(false);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration in clock.toml                ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=clock.toml validated successfully");

    BoardConfig {
        tick_ms,
        watchdog_timeout_ms,
        bed_fitted,
        psu_active_low,
        telemetry_baudrate,
        intercom_baudrate,
    }
}

/// Integer `key` of `[section]`, if present
fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Optional boolean `key` of `[section]`
fn boolean(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<bool> {
    let value = config.get(section)?.get(key)?;
    match value.as_bool() {
        Some(b) => Some(b),
        None => {
            errors.push(format!("[{}] {} must be true or false", section, key));
            None
        }
    }
}

/// Optional `[section] baudrate`, defaulting to 115200
fn baudrate(config: &toml::Value, section: &str, errors: &mut Vec<String>) -> i64 {
    match config.get(section).and_then(|s| s.get("baudrate")) {
        None => 115_200,
        Some(toml::Value::Integer(baud)) if (1200..=921_600).contains(baud) => *baud,
        Some(_) => {
            errors.push(format!("[{}] baudrate must be 1200-921600", section));
            115_200
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write board_config.rs into OUT_DIR
fn generate_board_config(config: &BoardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let source = format!(
        "/// SysTick period in milliseconds\n\
         pub const TICK_MS: u8 = {};\n\
         /// Hardware watchdog timeout in milliseconds\n\
         pub const WATCHDOG_TIMEOUT_MS: u64 = {};\n\
         /// Bed thermistor fitted\n\
         pub const BED_FITTED: bool = {};\n\
         /// PSU enable is active-low\n\
         pub const PSU_ACTIVE_LOW: bool = {};\n\
         /// Status telemetry UART baudrate\n\
         pub const TELEMETRY_BAUDRATE: u32 = {};\n\
         /// Inter-board link UART baudrate\n\
         pub const INTERCOM_BAUDRATE: u32 = {};\n",
        config.tick_ms,
        config.watchdog_timeout_ms,
        config.bed_fitted,
        config.psu_active_low,
        config.telemetry_baudrate,
        config.intercom_baudrate,
    );
    fs::write(out_dir.join("board_config.rs"), source).unwrap();
}
