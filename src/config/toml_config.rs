use crate::config::{parse_locale, Endpoints, OutputFormat, DEFAULT_LOCALE};
use crate::core::ConfigProvider;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    #[serde(default)]
    pub endpoints: Endpoints,
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub locale: Option<String>,
    pub format: Option<OutputFormat>,
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_TOKEN})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於檔案設定
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::cli::CliConfig) {
        if let Some(base_url) = &cli.api_base_url {
            self.source.base_url = base_url.clone();
        }
        if let Some(format) = cli.format {
            self.display.format = Some(format);
        }
        if let Some(locale) = &cli.locale {
            self.display.locale = Some(locale.clone());
        }
        if let Some(today) = cli.today {
            self.display.today = Some(today);
        }
        if let Some(path) = &cli.output {
            self.output.path = Some(path.clone());
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.source.base_url
    }

    fn endpoints(&self) -> &Endpoints {
        &self.source.endpoints
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.source
            .headers
            .as_ref()
            .map(|headers| {
                headers
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn locale(&self) -> &str {
        self.display.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    fn output_format(&self) -> OutputFormat {
        self.display.format.unwrap_or_default()
    }

    fn today(&self) -> Option<NaiveDate> {
        self.display.today
    }

    fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        self.source.endpoints.validate("source.endpoints")?;
        parse_locale("display.locale", self.locale())?;

        if let Some(headers) = &self.source.headers {
            for name in headers.keys() {
                validation::validate_non_empty_string("source.headers", name)?;
            }
        }

        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }

        Ok(())
    }
}
