//! Build script for chronomatrix-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const COLORS: [&str; 8] = [
    "off", "red", "blue", "magenta", "green", "yellow", "cyan", "white",
];

const OVERFLOW_POLICIES: [&str; 2] = ["clamp", "wrap"];

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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate panel.toml configuration at compile time
fn validate_config() {
    // Re-run if panel.toml changes
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a panel.toml configuration file.            ║\n\
            ║  Please create one in the chronomatrix-firmware directory.       ║\n\
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
                ║  ERROR: Failed to read panel.toml                                ║\n\
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
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    report("panel", validate_panel(&config));
    report("timer", validate_timer(&config));
    report("input", validate_input(&config));

    println!("cargo:warning=panel.toml validated successfully");
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

/// Abort the build if a section produced errors
fn report(what: &str, errors: Vec<String>) {
    if errors.is_empty() {
        return;
    }

    let title = format!("ERROR: Invalid {} configuration", what);
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  {:<64} ║\n\
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

/// Look up a table, reporting it if it is present with the wrong type
fn table<'a>(
    value: Option<&'a toml::Value>,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match value {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => None,
    }
}

/// Reject keys the firmware parser does not know
fn check_keys(
    table: &toml::value::Table,
    section: &str,
    known: &[&str],
    errors: &mut Vec<String>,
) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

/// Validate the [panel] section
fn validate_panel(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(root) = config.as_table() {
        for key in root.keys() {
            if !["panel", "timer", "input"].contains(&key.as_str()) {
                errors.push(format!("unknown section [{}]", key));
            }
        }
    }

    let Some(panel) = table(config.get("panel"), "panel", &mut errors) else {
        return errors;
    };

    check_keys(
        panel,
        "panel",
        &["color", "punctuation_color", "data_clock_hz", "row_clock_hz"],
        &mut errors,
    );

    for key in ["color", "punctuation_color"] {
        match panel.get(key) {
            Some(toml::Value::String(color)) => {
                if !COLORS.contains(&color.as_str()) {
                    errors.push(format!("[panel] {} '{}' is not a colour", key, color));
                }
            }
            Some(_) => errors.push(format!("[panel] {} must be a string", key)),
            None => {}
        }
    }

    for key in ["data_clock_hz", "row_clock_hz"] {
        match panel.get(key) {
            Some(toml::Value::Integer(hz)) => {
                // The PIO divider cannot go below 1 or above 65535
                if *hz < 1_908 || *hz > 125_000_000 {
                    errors.push(format!("[panel] {} must be 1908-125000000", key));
                }
            }
            Some(_) => errors.push(format!("[panel] {} must be an integer", key)),
            None => {}
        }
    }

    errors
}

/// Validate the [timer] section
fn validate_timer(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(timer) = table(config.get("timer"), "timer", &mut errors) else {
        return errors;
    };

    check_keys(timer, "timer", &["tick_ms", "overflow"], &mut errors);

    match timer.get("tick_ms") {
        Some(toml::Value::Integer(ms)) => {
            if *ms < 1 || *ms > u32::MAX as i64 {
                errors.push("[timer] tick_ms must be at least 1".to_string());
            }
        }
        Some(_) => errors.push("[timer] tick_ms must be an integer".to_string()),
        None => {}
    }

    match timer.get("overflow") {
        Some(toml::Value::String(policy)) => {
            if !OVERFLOW_POLICIES.contains(&policy.as_str()) {
                errors.push("[timer] overflow must be 'clamp' or 'wrap'".to_string());
            }
        }
        Some(_) => errors.push("[timer] overflow must be a string".to_string()),
        None => {}
    }

    errors
}

/// Validate the [input] section
fn validate_input(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(input) = table(config.get("input"), "input", &mut errors) else {
        return errors;
    };

    check_keys(input, "input", &["enabled", "baudrate"], &mut errors);

    if let Some(enabled) = input.get("enabled") {
        if !enabled.is_bool() {
            errors.push("[input] enabled must be true or false".to_string());
        }
    }

    match input.get("baudrate") {
        Some(toml::Value::Integer(baud)) => {
            if *baud < 300 || *baud > 921_600 {
                errors.push("[input] baudrate must be 300-921600".to_string());
            }
        }
        Some(_) => errors.push("[input] baudrate must be an integer".to_string()),
        None => {}
    }

    errors
}
