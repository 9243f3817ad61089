pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::HttpDataSource, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use self::core::{engine::DashboardEngine, loader::Dashboard, view::DashboardView};
pub use utils::error::{DashboardError, Result};
