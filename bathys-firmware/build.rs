//! Build script for bathys-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates mission.toml at compile time
//! - Checks that the status page templates exist

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Fragments the status page is assembled from, with their `{}` count
const TEMPLATES: &[(&str, usize)] = &[
    ("templates/head.html", 3),
    ("templates/profile_start.html", 2),
    ("templates/row.html", 3),
    ("templates/profile_end.html", 0),
    ("templates/foot.html", 1),
];

/// Readings the status page has room for over a whole mission
const MAX_READINGS: i64 = 96;

fn main() {
    setup_linker();
    validate_config();
    validate_templates();
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

/// Validate mission.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=mission.toml");

    let config_path = Path::new("mission.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read mission.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in mission.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_mission(&config, &mut errors);
    validate_calibration(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid mission configuration", &errors);
    }

    println!("cargo:warning=mission.toml validated successfully");
}

/// Validate the [mission] table
fn validate_mission(config: &toml::Value, errors: &mut Vec<String>) {
    let mission = match config.get("mission") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[mission] must be a table".to_string());
            return;
        }
        None => return,
    };

    // (key, min, max)
    let integers: &[(&str, i64, i64)] = &[
        ("sink_seconds", 0, u16::MAX as i64),
        ("surface_seconds", 0, u16::MAX as i64),
        ("wait_surface_seconds", 0, u16::MAX as i64),
        ("bobbing_duration_seconds", 0, u16::MAX as i64),
        ("num_profiles", 1, 8),
        ("samples_per_phase", 1, 16),
        ("sample_interval_seconds", 0, u16::MAX as i64),
    ];

    for (key, value) in mission {
        if let Some((_, min, max)) = integers.iter().find(|(name, _, _)| *name == key.as_str()) {
            match value {
                toml::Value::Integer(n) if (*min..=*max).contains(n) => {}
                toml::Value::Integer(_) => {
                    errors.push(format!("[mission] {} must be {}-{}", key, min, max))
                }
                _ => errors.push(format!("[mission] {} must be an integer", key)),
            }
            continue;
        }

        match key.as_str() {
            "depth_threshold_m" | "pressure_offset" => {
                if number(value).is_none() {
                    errors.push(format!("[mission] {} must be a number", key));
                }
            }
            "debug_mode" => {
                if !value.is_bool() {
                    errors.push("[mission] debug_mode must be true or false".to_string());
                }
            }
            _ => errors.push(format!("[mission] unknown key '{}'", key)),
        }
    }

    // Defaults: 3 profiles, 8 samples per phase
    let profiles = mission.get("num_profiles").and_then(|v| v.as_integer()).unwrap_or(3);
    let samples = mission.get("samples_per_phase").and_then(|v| v.as_integer()).unwrap_or(8);
    if profiles.saturating_mul(3).saturating_mul(samples) > MAX_READINGS {
        errors.push(format!(
            "[mission] {} profiles x 3 phases x {} samples exceeds {} readings",
            profiles, samples, MAX_READINGS
        ));
    }
}

/// Validate the [calibration] table
fn validate_calibration(config: &toml::Value, errors: &mut Vec<String>) {
    let calibration = match config.get("calibration") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[calibration] must be a table".to_string());
            return;
        }
        None => return,
    };

    for (key, value) in calibration {
        match key.as_str() {
            "pressure_offset" | "surface_pressure_hpa" => {
                if number(value).is_none() {
                    errors.push(format!("[calibration] {} must be a number", key));
                }
            }
            "hpa_per_meter" => match number(value) {
                Some(v) if v > 0.0 => {}
                _ => errors.push("[calibration] hpa_per_meter must be positive".to_string()),
            },
            _ => errors.push(format!("[calibration] unknown key '{}'", key)),
        }
    }
}

/// Check template fragments exist and carry the right placeholder count
fn validate_templates() {
    let mut errors = Vec::new();

    for (path, expected) in TEMPLATES {
        println!("cargo:rerun-if-changed={}", path);
        match fs::read_to_string(path) {
            Ok(text) => {
                let found = text.matches("{}").count();
                if found != *expected {
                    errors.push(format!("{} has {} '{{}}', expected {}", path, found, expected));
                }
            }
            Err(_) => errors.push(format!("{} not found", path)),
        }
    }

    if !errors.is_empty() {
        fail("Invalid status page templates", &errors);
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(n) => Some(*n as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
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
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
