//! Build script for si4731-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates radio.toml at compile time
//! - Generates `radio_config.rs` constants from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lowest station the chip tunes, in 10 kHz units
const BAND_MIN_UNITS: i64 = 6400;
/// Highest station the chip tunes, in 10 kHz units
const BAND_MAX_UNITS: i64 = 10800;

fn main() {
    setup_linker();
    let config = load_config();
    let radio = validate_config(&config);
    write_constants(&radio);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse radio.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=radio.toml");

    let config_path = Path::new("radio.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: radio.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a radio.toml configuration file.          ║\n\
            ║  Please create one in the si4731-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read radio.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in radio.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
}

/// Validated radio.toml values
struct RadioValues {
    i2c_khz: i64,
    sen_high: bool,
    startup_delay_s: i64,
    station_units: i64,
    console_baud: i64,
}

/// Check every section and collect the values the firmware needs
///
/// All problems are reported together.
fn validate_config(config: &toml::Value) -> RadioValues {
    let mut errors = Vec::new();

    for section in ["i2c", "radio", "console"] {
        if config.get(section).and_then(|s| s.as_table()).is_none() {
            errors.push(format!("Missing [{}] section", section));
        }
    }
    if !errors.is_empty() {
        report_errors("Missing required sections in radio.toml", &errors);
    }

    let i2c_khz = match config["i2c"].get("frequency_khz") {
        Some(toml::Value::Integer(khz)) if (10..=400).contains(khz) => *khz,
        Some(toml::Value::Integer(_)) => {
            errors.push("[i2c] frequency_khz must be 10-400".to_string());
            0
        }
        _ => {
            errors.push("[i2c] missing integer 'frequency_khz'".to_string());
            0
        }
    };

    let radio = &config["radio"];

    let sen_high = match radio.get("address") {
        Some(toml::Value::String(mode)) if mode == "sen_low" => false,
        Some(toml::Value::String(mode)) if mode == "sen_high" => true,
        Some(_) => {
            errors.push("[radio] address must be 'sen_low' or 'sen_high'".to_string());
            false
        }
        None => {
            errors.push("[radio] missing 'address'".to_string());
            false
        }
    };

    let startup_delay_s = match radio.get("startup_delay_s") {
        Some(toml::Value::Integer(s)) if (0..=60).contains(s) => *s,
        Some(_) => {
            errors.push("[radio] startup_delay_s must be an integer 0-60".to_string());
            0
        }
        None => 4,
    };

    let station_mhz = match radio.get("station_mhz") {
        Some(toml::Value::Float(mhz)) => Some(*mhz),
        Some(toml::Value::Integer(mhz)) => Some(*mhz as f64),
        Some(_) => {
            errors.push("[radio] station_mhz must be a number".to_string());
            None
        }
        None => {
            errors.push("[radio] missing 'station_mhz'".to_string());
            None
        }
    };
    let station_units = match station_mhz {
        Some(mhz) => {
            let units = (mhz * 100.0 + 0.5) as i64;
            if !(BAND_MIN_UNITS..=BAND_MAX_UNITS).contains(&units) {
                errors.push(format!("[radio] station_mhz {} is outside 64.0-108.0", mhz));
            }
            units
        }
        None => 0,
    };

    let console_baud = match config["console"].get("baud") {
        Some(toml::Value::Integer(baud)) if *baud > 0 => *baud,
        _ => {
            errors.push("[console] baud must be a positive integer".to_string());
            0
        }
    };

    if !errors.is_empty() {
        report_errors("Invalid radio configuration", &errors);
    }

    println!("cargo:warning=radio.toml validated successfully");

    RadioValues {
        i2c_khz,
        sen_high,
        startup_delay_s,
        station_units,
        console_baud,
    }
}

/// Write the constants `main.rs` includes
fn write_constants(radio: &RadioValues) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let address = if radio.sen_high { "SenHigh" } else { "SenLow" };

    let generated = format!(
        "// Generated from radio.toml by build.rs\n\
         pub const I2C_FREQUENCY_KHZ: u32 = {};\n\
         pub const ADDRESS_MODE: AddressMode = AddressMode::{};\n\
         pub const STARTUP_DELAY_S: u64 = {};\n\
         pub const STATION_UNITS: u16 = {};\n\
         pub const CONSOLE_BAUD: u32 = {};\n",
        radio.i2c_khz, address, radio.startup_delay_s, radio.station_units, radio.console_baud
    );

    fs::write(out_dir.join("radio_config.rs"), generated).unwrap();
}

/// Panic with a boxed list of problems
fn report_errors(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
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
