//! Minimal TOML subset parser for mission configuration
//!
//! Handles only what `mission.toml` needs; it does NOT support the full
//! TOML grammar.
//!
//! Supported:
//! - `key = value` pairs (integer, float, boolean)
//! - `[mission]` and `[calibration]` section headers
//! - Comments (`# ...`), including trailing comments
//!
//! Keys before the first header belong to `[mission]`. Keys that are not
//! set keep their default value.

use core::str::FromStr;

use super::types::{ConfigError, MissionConfig, PressureMode};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Mission,
    Calibration,
}

/// Parse `mission.toml` content into a validated [`MissionConfig`]
pub fn parse_mission_config(input: &str) -> Result<MissionConfig, ConfigError> {
    let mut config = MissionConfig::default();
    let mut section = Section::Mission;

    for (index, raw) in input.lines().enumerate() {
        let line = (index + 1).min(u16::MAX as usize) as u16;
        let text = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();

        if text.is_empty() {
            continue;
        }

        if let Some(header) = text.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ConfigError::Syntax { line })?
                .trim();
            section = match name {
                "mission" => Section::Mission,
                "calibration" => Section::Calibration,
                _ => return Err(ConfigError::UnknownSection { line }),
            };
            continue;
        }

        let (key, value) = text.split_once('=').ok_or(ConfigError::Syntax { line })?;
        let key = key.trim();
        let value = value.trim();

        match section {
            Section::Mission => apply_mission_key(&mut config, key, value, line)?,
            Section::Calibration => apply_calibration_key(&mut config, key, value, line)?,
        }
    }

    config.validate()?;
    Ok(config)
}

fn apply_mission_key(
    config: &mut MissionConfig,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ConfigError> {
    match key {
        "sink_seconds" => config.sink_s = parse_value(value, line)?,
        "surface_seconds" => config.surface_s = parse_value(value, line)?,
        "wait_surface_seconds" => config.wait_surface_s = parse_value(value, line)?,
        "bobbing_duration_seconds" => config.bobbing_duration_s = parse_value(value, line)?,
        "num_profiles" => config.num_profiles = parse_value(value, line)?,
        "depth_threshold_m" => config.depth_threshold_m = parse_value(value, line)?,
        "samples_per_phase" => config.samples_per_phase = parse_value(value, line)?,
        "sample_interval_seconds" => config.sample_interval_s = parse_value(value, line)?,
        "debug_mode" => {
            config.pressure_mode = if parse_value::<bool>(value, line)? {
                PressureMode::Synthetic
            } else {
                PressureMode::Sensor
            }
        }
        // Accepted in [mission] as well, where older configs kept it
        "pressure_offset" => config.calibration.pressure_trim_hpa = parse_value(value, line)?,
        _ => return Err(ConfigError::UnknownKey { line }),
    }
    Ok(())
}

fn apply_calibration_key(
    config: &mut MissionConfig,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ConfigError> {
    let calibration = &mut config.calibration;
    match key {
        "pressure_offset" => calibration.pressure_trim_hpa = parse_value(value, line)?,
        "surface_pressure_hpa" => calibration.surface_pressure_hpa = parse_value(value, line)?,
        "hpa_per_meter" => calibration.hpa_per_meter = parse_value(value, line)?,
        _ => return Err(ConfigError::UnknownKey { line }),
    }
    Ok(())
}

fn parse_value<T: FromStr>(value: &str, line: u16) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue { line })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Reference float mission
[mission]
sink_seconds = 6
surface_seconds = 6
wait_surface_seconds = 45
bobbing_duration_seconds = 45
num_profiles = 3
depth_threshold_m = 2.5
samples_per_phase = 8
sample_interval_seconds = 5
debug_mode = false

[calibration]
pressure_offset = 4.56   # bench trim for float #2
";

    #[test]
    fn test_parse_full_config() {
        let config = parse_mission_config(SAMPLE).unwrap();
        assert_eq!(config.sink_s, 6);
        assert_eq!(config.num_profiles, 3);
        assert_eq!(config.samples_per_phase, 8);
        assert_eq!(config.pressure_mode, PressureMode::Sensor);
        assert!((config.calibration.pressure_trim_hpa - 4.56).abs() < 1e-6);
        assert_eq!(config.calibration.hpa_per_meter, 9.78);
    }

    #[test]
    fn test_empty_input_uses_defaults() {
        let config = parse_mission_config("").unwrap();
        assert_eq!(config, MissionConfig::default());
    }

    #[test]
    fn test_root_keys_belong_to_mission() {
        let config = parse_mission_config("num_profiles = 1\ndebug_mode = true\n").unwrap();
        assert_eq!(config.num_profiles, 1);
        assert!(config.debug_mode());
    }

    #[test]
    fn test_unknown_key_reports_line() {
        let result = parse_mission_config("[mission]\nsink_seconds = 6\ndive_forever = true\n");
        assert_eq!(result, Err(ConfigError::UnknownKey { line: 3 }));
    }

    #[test]
    fn test_unknown_section() {
        let result = parse_mission_config("[wifi]\n");
        assert_eq!(result, Err(ConfigError::UnknownSection { line: 1 }));
    }

    #[test]
    fn test_invalid_value() {
        let result = parse_mission_config("sink_seconds = six\n");
        assert_eq!(result, Err(ConfigError::InvalidValue { line: 1 }));

        let result = parse_mission_config("num_profiles = 300\n");
        assert_eq!(result, Err(ConfigError::InvalidValue { line: 1 }));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(
            parse_mission_config("[mission\n"),
            Err(ConfigError::Syntax { line: 1 })
        );
        assert_eq!(
            parse_mission_config("\n\nsink_seconds\n"),
            Err(ConfigError::Syntax { line: 3 })
        );
    }

    #[test]
    fn test_parsed_config_is_validated() {
        let result = parse_mission_config("samples_per_phase = 0\n");
        assert_eq!(result, Err(ConfigError::SampleCount));
    }
}
