use city_iata_etl::core::ConfigProvider;
use city_iata_etl::utils::error::EtlError;
use city_iata_etl::utils::{logger, validation::Validate};
use city_iata_etl::{
    CliConfig, EtlEngine, LocalStorage, OpenAiClient, PdfExtractionPipeline, PdfTextExtractor,
    TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在也沒關係
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting city-iata extraction");
    tracing::debug!("CLI config: {:?}", cli);

    let base_dir = cli.base_dir.clone();
    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config, base_dir).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli, base_dir).await,
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Extraction completed successfully!");
            println!("✅ City table saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Extraction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

async fn run<C>(config: C, base_dir: String) -> Result<String, EtlError>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;

    let llm_client = if config.llm_enabled() {
        let client = OpenAiClient::from_config(&config)?;
        tracing::info!("LLM pass enabled (model: {})", client.model());
        Some(client)
    } else {
        tracing::info!("LLM pass disabled, running regex passes only");
        None
    };

    let storage = LocalStorage::new(base_dir);
    let mut pipeline = PdfExtractionPipeline::new(storage, PdfTextExtractor::new(), config);
    if let Some(client) = llm_client {
        pipeline = pipeline.with_completion_client(Box::new(client));
    }

    EtlEngine::new(pipeline).run().await
}
