use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    core::trends::MAX_TREND_MONTHS,
    errors::LedgerError,
    ledger::{parse_timezone, Category},
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";

/// Tunables for the ledger engine and its presentation adapters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Member zero of every group and the default payer of new expenses.
    pub owner_name: String,
    /// IANA timezone used to derive calendar days.
    pub reference_timezone: String,
    /// Transfers at or below this amount are treated as rounding noise.
    pub settlement_epsilon: f64,
    /// Streak length that must be exceeded before bonus points are awarded.
    pub streak_bonus_threshold: u32,
    pub streak_bonus_points: u64,
    pub trend_months: u32,
    pub recent_limit: usize,
    pub currency_symbol: String,
    pub default_categories: Vec<Category>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            owner_name: "You".into(),
            reference_timezone: "Asia/Kolkata".into(),
            settlement_epsilon: 0.01,
            streak_bonus_threshold: 10,
            streak_bonus_points: 10,
            trend_months: 6,
            recent_limit: 10,
            currency_symbol: "₹".into(),
            default_categories: default_categories(),
        }
    }
}

impl EngineConfig {
    pub fn timezone(&self) -> Result<Tz, LedgerError> {
        parse_timezone(&self.reference_timezone)
    }

    /// Rejects settings the engine cannot work with.
    pub fn validate(&self) -> Result<(), LedgerError> {
        self.timezone()?;
        if self.owner_name.trim().is_empty() {
            return Err(LedgerError::Config("owner_name must not be empty".into()));
        }
        if !self.settlement_epsilon.is_finite() || self.settlement_epsilon < 0.0 {
            return Err(LedgerError::Config(
                "settlement_epsilon must be a non-negative number".into(),
            ));
        }
        if !(1..=MAX_TREND_MONTHS).contains(&self.trend_months) {
            return Err(LedgerError::Config(format!(
                "trend_months must be between 1 and {MAX_TREND_MONTHS}"
            )));
        }
        Ok(())
    }

    /// Keys accepted by [`EngineConfig::set_value`], with their current values.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("owner_name", self.owner_name.clone()),
            ("reference_timezone", self.reference_timezone.clone()),
            ("settlement_epsilon", self.settlement_epsilon.to_string()),
            ("streak_bonus_threshold", self.streak_bonus_threshold.to_string()),
            ("streak_bonus_points", self.streak_bonus_points.to_string()),
            ("trend_months", self.trend_months.to_string()),
            ("recent_limit", self.recent_limit.to_string()),
            ("currency_symbol", self.currency_symbol.clone()),
        ]
    }

    /// Updates one setting from its textual form and re-validates.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let mut next = self.clone();
        match key {
            "owner_name" => next.owner_name = value.trim().to_string(),
            "reference_timezone" => next.reference_timezone = value.trim().to_string(),
            "settlement_epsilon" => next.settlement_epsilon = parse_setting(key, value)?,
            "streak_bonus_threshold" => next.streak_bonus_threshold = parse_setting(key, value)?,
            "streak_bonus_points" => next.streak_bonus_points = parse_setting(key, value)?,
            "trend_months" => next.trend_months = parse_setting(key, value)?,
            "recent_limit" => next.recent_limit = parse_setting(key, value)?,
            "currency_symbol" => next.currency_symbol = value.to_string(),
            other => return Err(LedgerError::Config(format!("unknown setting `{other}`"))),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, LedgerError> {
    value
        .trim()
        .parse()
        .map_err(|_| LedgerError::Config(format!("invalid value `{value}` for `{key}`")))
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Food", "🍔"),
        Category::new("Transport", "🚗"),
        Category::new("Entertainment", "🎬"),
        Category::new("Utilities", "💡"),
        Category::new("Shopping", "🛍️"),
        Category::new("Other", "❓"),
    ]
}

/// Loads and stores [`EngineConfig`] as pretty JSON.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for `config.json` in the application data directory.
    pub fn new() -> Self {
        Self {
            path: paths::config_file(),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the stored configuration, or defaults when no file exists yet.
    pub fn load(&self) -> Result<EngineConfig, LedgerError> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            EngineConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), LedgerError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.json"));
        let config = manager.load().unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.default_categories.len(), 6);
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("nested").join("config.json"));
        let config = EngineConfig {
            owner_name: "Priya".into(),
            reference_timezone: "Europe/Berlin".into(),
            ..EngineConfig::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "settlement_epsilon": 0.5 }"#).unwrap();
        let config = ConfigManager::with_path(&path).load().unwrap();
        assert_eq!(config.settlement_epsilon, 0.5);
        assert_eq!(config.owner_name, "You");
    }

    #[test]
    fn unknown_timezone_is_a_config_error() {
        let config = EngineConfig {
            reference_timezone: "Nowhere/Land".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(LedgerError::Config(_))));
    }

    #[test]
    fn set_value_parses_and_validates() {
        let mut config = EngineConfig::default();
        config.set_value("trend_months", "12").unwrap();
        assert_eq!(config.trend_months, 12);
        assert!(config.set_value("trend_months", "0").is_err());
        assert!(config.set_value("trend_months", "121").is_err());
        assert!(config.set_value("trend_months", "100000000").is_err());
        config.set_value("trend_months", "120").unwrap();
        config.set_value("trend_months", "12").unwrap();
        assert!(config.set_value("reference_timezone", "Mars/Base").is_err());
        assert!(config.set_value("colour", "blue").is_err());
        assert_eq!(config.trend_months, 12);
        assert_eq!(config.reference_timezone, "Asia/Kolkata");
    }
}
