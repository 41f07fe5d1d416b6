use catalog_tagger::core::{ConfigProvider, Pipeline};
use catalog_tagger::utils::{logger, validation::Validate};
use catalog_tagger::{EtlEngine, LocalStorage, TaggingPipeline, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-tagger")]
#[command(about = "Catalog tagger driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "tagger.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines instead of the compact format
    #[arg(long)]
    json_logs: bool,

    /// Override the parallel setting from config
    #[arg(long)]
    parallel: Option<bool>,

    /// Classify and print the tags per handle without writing output
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based catalog tagger");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 應用命令列覆蓋設定
    if let Some(parallel) = args.parallel {
        config
            .performance
            .get_or_insert(catalog_tagger::config::toml_config::PerformanceConfig {
                parallel: None,
            })
            .parallel = Some(parallel);
        tracing::info!("🔧 Parallel classification overridden to: {}", parallel);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    let pipeline = TaggingPipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no output will be written");
        if let Err(e) = perform_dry_run(&pipeline).await {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
        return Ok(());
    }

    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Tagging completed successfully!");
            println!("✅ Tagged catalog saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Tagging failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let columns = config.columns();
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Pipeline: {}", config.pipeline_name());
    tracing::info!("  Input: {}", config.input_path());
    tracing::info!("  Output: {}", config.output_path());
    tracing::info!("  Managed vendor: {}", config.managed_vendor());
    tracing::info!("  Tag separator: {:?}", config.tag_separator());
    tracing::info!("  Parallel: {}", config.parallel());
    tracing::debug!("  Columns: {:?}", columns);
}

async fn perform_dry_run(
    pipeline: &TaggingPipeline<LocalStorage, TomlConfig>,
) -> catalog_tagger::Result<()> {
    let sheet = pipeline.extract().await?;
    tracing::info!("📥 Read {} rows", sheet.records.len());

    let result = pipeline.transform(sheet).await?;
    for product in &result.products {
        println!("{}", serde_json::to_string(product)?);
    }

    let stats = &result.stats;
    tracing::info!(
        "🔍 Would tag {} products ({} other vendor, {} variant rows cleared)",
        stats.products_tagged,
        stats.not_applicable,
        stats.variants_cleared
    );
    tracing::info!("📊 Tiers: {}", serde_json::to_string(&stats.tiers)?);
    Ok(())
}
