use anyhow::Context;
use clap::Parser;
use kurs_dashboard::core::{ConfigProvider, Storage};
use kurs_dashboard::utils::{logger, validation::Validate};
use kurs_dashboard::{CliConfig, DashboardEngine, DashboardError, HttpDataSource, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting kurs-dashboard");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            config.apply_overrides(&cli);
            run(&config).await
        }
        None => run(&cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Dashboard failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: &C) -> Result<(), DashboardError> {
    config.validate()?;
    tracing::debug!("Data service: {}", config.api_base_url());

    let source = HttpDataSource::from_config(config)?;
    let engine = DashboardEngine::from_config(source, config)?;
    let rendered = engine.run().await?;

    match config.output_path() {
        Some(path) => {
            LocalStorage::new(".").write_file(path, rendered.as_bytes()).await?;
            tracing::info!("📁 Dashboard saved to: {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
