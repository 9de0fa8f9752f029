//! Build script for ledchain-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest chain the firmware can drive
const MAX_MODULES: i64 = 16;

/// Longest boot text the firmware can hold
const MAX_TEXT_LEN: usize = 64;

fn main() {
    setup_linker();
    validate_config();
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
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a display.toml configuration file.        ║\n\
            ║  Please create one in the ledchain-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => report("Failed to read display.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => report(
            "Invalid TOML syntax in display.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_spi(&config, &mut errors);
    validate_scroll(&config, &mut errors);

    if !errors.is_empty() {
        report("Invalid display configuration", &errors);
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Print a boxed error listing and abort the build
fn report(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|e| {
                let e = if e.len() > 62 {
                    format!("{}...", &e[..59])
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", e)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only the sections the runtime parser knows are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        if !["display", "spi", "scroll"].contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };

    if let Some(count) = display.get("module_count") {
        match count.as_integer() {
            Some(n) if (1..=MAX_MODULES).contains(&n) => {}
            _ => errors.push(format!("[display] module_count must be 1-{}", MAX_MODULES)),
        }
    }

    if let Some(brightness) = display.get("brightness") {
        match brightness.as_integer() {
            Some(level) if (0..=255).contains(&level) => {
                if level > 15 {
                    println!("cargo:warning=display.toml brightness {} will be clamped to 15", level);
                }
            }
            _ => errors.push("[display] brightness must be an integer 0-15".to_string()),
        }
    }

    if let Some(order) = display.get("chain_order") {
        if !matches!(order.as_str(), Some("reversed" | "Reversed" | "forward" | "Forward")) {
            errors.push("[display] chain_order must be 'reversed' or 'forward'".to_string());
        }
    }

    if let Some(text) = display.get("boot_text") {
        match text.as_str() {
            Some(s) if s.len() <= MAX_TEXT_LEN => {}
            Some(_) => errors.push(format!("[display] boot_text longer than {} bytes", MAX_TEXT_LEN)),
            None => errors.push("[display] boot_text must be a string".to_string()),
        }
    }
}

fn validate_spi(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(spi) = config.get("spi") else {
        return;
    };

    let mut pins = Vec::new();
    for key in ["mosi_pin", "sck_pin", "cs_pin"] {
        let Some(value) = spi.get(key) else {
            continue;
        };
        match value.as_str().and_then(pin_number) {
            Some(pin) if pin < 30 => {
                if pins.contains(&pin) {
                    errors.push(format!("[spi] gpio{} assigned twice", pin));
                }
                pins.push(pin);
            }
            _ => errors.push(format!("[spi] {} must look like \"gpioNN\" (0-29)", key)),
        }
    }

    if let Some(freq) = spi.get("frequency_hz") {
        match freq.as_integer() {
            Some(hz) if hz > 0 && hz <= 10_000_000 => {}
            Some(hz) if hz > 10_000_000 => {
                println!("cargo:warning=display.toml SPI clock {} Hz exceeds the MAX7219 10 MHz limit", hz)
            }
            _ => errors.push("[spi] frequency_hz must be a positive integer".to_string()),
        }
    }
}

fn validate_scroll(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(scroll) = config.get("scroll") else {
        return;
    };

    for key in ["step_delay_ms", "repetitions"] {
        if let Some(value) = scroll.get(key) {
            match value.as_integer() {
                Some(n) if (0..=u32::MAX as i64).contains(&n) => {}
                _ => errors.push(format!("[scroll] {} must be a non-negative integer", key)),
            }
        }
    }
}

/// Pin number from "gpioNN" or "!gpioNN"
fn pin_number(s: &str) -> Option<u8> {
    s.trim_start_matches('!').strip_prefix("gpio")?.parse().ok()
}
