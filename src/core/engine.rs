use crate::config::{parse_locale, OutputFormat};
use crate::core::loader::Dashboard;
use crate::core::render;
use crate::core::view::{DashboardView, ViewOptions};
use crate::core::{ConfigProvider, DataSource};
use crate::utils::error::Result;
use chrono::Local;

/// Loads, derives and renders one dashboard.
pub struct DashboardEngine<D: DataSource> {
    source: D,
    options: ViewOptions,
    format: OutputFormat,
}

impl<D: DataSource> DashboardEngine<D> {
    pub fn new(source: D, options: ViewOptions, format: OutputFormat) -> Self {
        Self {
            source,
            options,
            format,
        }
    }

    /// `today` falls back to the local calendar date.
    pub fn from_config<C: ConfigProvider>(source: D, config: &C) -> Result<Self> {
        let options = ViewOptions {
            today: config.today().unwrap_or_else(|| Local::now().date_naive()),
            locale: parse_locale("locale", config.locale())?,
        };
        Ok(Self::new(source, options, config.output_format()))
    }

    pub async fn build_view(&self) -> DashboardView {
        tracing::info!("🚀 Loading dashboard for {}", self.options.today);
        let dashboard = Dashboard::load(&self.source).await;
        tracing::debug!("Dashboard settled as {:?}", dashboard.state());
        DashboardView::build(&dashboard, &self.options)
    }

    /// A failed load still renders (with zero values); only rendering errors
    /// are returned.
    pub async fn run(&self) -> Result<String> {
        let view = self.build_view().await;
        render::render(&view, self.format)
    }
}
