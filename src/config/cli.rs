use crate::config::{parse_locale, Endpoints, OutputFormat, DEFAULT_API_BASE_URL, DEFAULT_LOCALE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "kurs-dashboard")]
#[command(about = "Administrative dashboard for the course management service")]
pub struct CliConfig {
    /// Base URL of the data service, e.g. https://kurse.example.org/api/
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format of the rendered dashboard
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Locale used for month labels (de_DE, en_US, ...)
    #[arg(long)]
    pub locale: Option<String>,

    /// Reference date for the statistics (YYYY-MM-DD), defaults to the local date
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Write the dashboard to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(skip)]
    pub endpoints: Endpoints,
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn today(&self) -> Option<NaiveDate> {
        self.today
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", self.api_base_url())?;
        parse_locale("locale", self.locale())?;
        if let Some(path) = &self.output {
            validation::validate_path("output", path)?;
        }
        Ok(())
    }
}
