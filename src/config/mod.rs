#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{DashboardError, Result};
use chrono::Locale;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_LOCALE: &str = "de_DE";

/// 各集合相對於 base URL 的路徑
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub dozenten: String,
    pub teilnehmer: String,
    pub raeume: String,
    pub kurse: String,
    pub anmeldungen: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dozenten: "dozenten/".to_string(),
            teilnehmer: "teilnehmer/".to_string(),
            raeume: "raeume/".to_string(),
            kurse: "kurse/".to_string(),
            anmeldungen: "anmeldungen/".to_string(),
        }
    }
}

impl Endpoints {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("dozenten", self.dozenten.as_str()),
            ("teilnehmer", self.teilnehmer.as_str()),
            ("raeume", self.raeume.as_str()),
            ("kurse", self.kurse.as_str()),
            ("anmeldungen", self.anmeldungen.as_str()),
        ]
        .into_iter()
    }

    pub fn validate(&self, prefix: &str) -> Result<()> {
        for (name, path) in self.iter() {
            crate::utils::validation::validate_non_empty_string(
                &format!("{}.{}", prefix, name),
                path,
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Locales the month labels can be rendered in.
pub fn parse_locale(field_name: &str, value: &str) -> Result<Locale> {
    let locale = match value.trim().replace('-', "_").as_str() {
        "de" | "de_DE" => Locale::de_DE,
        "de_AT" => Locale::de_AT,
        "de_CH" => Locale::de_CH,
        "en" | "en_US" => Locale::en_US,
        "en_GB" => Locale::en_GB,
        "fr" | "fr_FR" => Locale::fr_FR,
        _ => {
            return Err(DashboardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Unsupported locale. Valid locales: de_DE, de_AT, de_CH, en_US, en_GB, fr_FR"
                    .to_string(),
            })
        }
    };
    Ok(locale)
}
