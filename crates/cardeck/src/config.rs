use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "cardeck";

const VALID_KEYS: &str = "stack.y_offset, stack.scale_step, stack.min_scale, input.drag_threshold, cursor.enabled, defaults.windowed";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Geometry of the resting card stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Vertical distance between neighbouring cards, in logical pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f32>,

    /// Scale lost per card of distance from the active one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_step: Option<f32>,

    /// Smallest scale a card may shrink to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f32>,
}

impl StackConfig {
    /// Apply the same bounds `config set` enforces to values read from a file.
    pub fn validate(&self) -> Result<()> {
        if let Some(v) = self.y_offset {
            check_positive("stack.y_offset", v)?;
        }
        if let Some(v) = self.scale_step {
            check_positive("stack.scale_step", v)?;
        }
        if let Some(v) = self.min_scale {
            check_unit("stack.min_scale", v)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_threshold: Option<f32>,
}

impl InputConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(v) = self.drag_threshold {
            check_positive("input.drag_threshold", v)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `cardeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(stack) = &self.stack {
            stack.validate()?;
        }
        if let Some(input) = &self.input {
            input.validate()?;
        }
        Ok(())
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                if Self::path().is_ok_and(|p| p.exists()) {
                    tracing::warn!("ignoring config file: {e:#}");
                } else {
                    tracing::debug!("using default config: {e}");
                }
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, format!("# cardeck configuration\n{yaml}"))?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "stack.y_offset" => {
                self.stack.get_or_insert_with(StackConfig::default).y_offset =
                    Some(parse_positive(key, value)?);
            }
            "stack.scale_step" => {
                self.stack.get_or_insert_with(StackConfig::default).scale_step =
                    Some(parse_positive(key, value)?);
            }
            "stack.min_scale" => {
                let min_scale = check_unit(key, parse_float(key, value)?)?;
                self.stack.get_or_insert_with(StackConfig::default).min_scale = Some(min_scale);
            }
            "input.drag_threshold" => {
                self.input
                    .get_or_insert_with(InputConfig::default)
                    .drag_threshold = Some(parse_positive(key, value)?);
            }
            "cursor.enabled" => {
                self.cursor.get_or_insert_with(CursorConfig::default).enabled =
                    Some(parse_bool(key, value)?);
            }
            "defaults.windowed" => {
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(parse_bool(key, value)?);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}

fn parse_float(key: &str, value: &str) -> Result<f32> {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a number."),
    }
}

fn parse_positive(key: &str, value: &str) -> Result<f32> {
    check_positive(key, parse_float(key, value)?)
}

fn check_positive(key: &str, v: f32) -> Result<f32> {
    if !v.is_finite() || v <= 0.0 {
        anyhow::bail!("Invalid {key}: {v}. Must be greater than zero.");
    }
    Ok(v)
}

fn check_unit(key: &str, v: f32) -> Result<f32> {
    if !(0.0..=1.0).contains(&v) {
        anyhow::bail!("Invalid {key}: {v}. Must be between 0 and 1.");
    }
    Ok(v)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be 'true' or 'false'."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_stack_values() {
        let mut config = Config::default();
        config.set("stack.y_offset", "32").unwrap();
        config.set("stack.scale_step", "0.04").unwrap();
        config.set("stack.min_scale", "0.2").unwrap();
        let stack = config.stack.unwrap();
        assert_eq!(stack.y_offset, Some(32.0));
        assert_eq!(stack.scale_step, Some(0.04));
        assert_eq!(stack.min_scale, Some(0.2));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("stack.y_offset", "-1").is_err());
        assert!(config.set("stack.min_scale", "1.5").is_err());
        assert!(config.set("input.drag_threshold", "far").is_err());
        assert!(config.set("cursor.enabled", "maybe").is_err());
        assert!(config.stack.is_none());
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let mut config = Config::default();
        let err = config.set("stack.depth", "3").unwrap_err().to_string();
        assert!(err.contains("input.drag_threshold"), "{err}");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut config = Config::default();
        config.set("input.drag_threshold", "45").unwrap();
        config.set("cursor.enabled", "false").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.input.and_then(|i| i.drag_threshold), Some(45.0));
        assert_eq!(loaded.cursor.and_then(|c| c.enabled), Some(false));
        assert!(loaded.stack.is_none());
    }

    #[test]
    fn test_load_rejects_out_of_range_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        std::fs::write(&path, "input:\n  drag_threshold: -5\n").unwrap();
        let err = Config::load_from(&path).unwrap_err().to_string();
        assert!(err.contains("input.drag_threshold"), "{err}");
    }

    #[test]
    fn test_section_validation() {
        let stack = StackConfig {
            y_offset: Some(-25.0),
            ..StackConfig::default()
        };
        assert!(stack.validate().is_err());
        let stack = StackConfig {
            min_scale: Some(3.0),
            ..StackConfig::default()
        };
        assert!(stack.validate().is_err());
        assert!(StackConfig::default().validate().is_ok());
        let input = InputConfig {
            drag_threshold: Some(0.0),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_missing_file_mentions_config_show() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME))
            .unwrap_err()
            .to_string();
        assert!(err.contains("config show"), "{err}");
    }
}
