use city_iata_etl::utils::logger;
use city_iata_etl::{
    CelesCountryLookup, CountryConversionPipeline, CountryNormalizer, EtlEngine, LocalStorage,
    TomlConfig,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "convert-countries")]
#[command(about = "Replace country codes in a city table with full country names")]
struct Args {
    /// JSON file of {city: {country: code, ...}}
    #[arg(long, default_value = "data/city_to_iata2.json")]
    input: String,

    #[arg(long, default_value = "data/city_to_iata_full_countries.json")]
    output: String,

    #[arg(long, default_value = ".")]
    base_dir: String,

    /// TOML file whose [countries] section supplies paths and extra overrides
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let (input, output, overrides) = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let loaded = TomlConfig::from_file(path)
                .and_then(|config| config.validate_countries().map(|_| config));
            let config = match loaded {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(e.severity().exit_code());
                }
            };
            let overrides: Vec<(String, String)> = config.country_overrides().collect();
            (
                config.countries.input_path.clone(),
                config.countries.output_path.clone(),
                overrides,
            )
        }
        None => (args.input.clone(), args.output.clone(), Vec::new()),
    };

    let normalizer = CountryNormalizer::new(CelesCountryLookup::new()).with_overrides(overrides);
    let storage = LocalStorage::new(args.base_dir.clone());
    let pipeline = CountryConversionPipeline::new(storage, normalizer, input, output);

    match EtlEngine::new(pipeline).run().await {
        Ok(output_path) => {
            println!("✅ Updated JSON saved to {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Country conversion failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
