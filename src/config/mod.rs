#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

pub const DEFAULT_PDF_PATH: &str = "data/iata-city-codes.pdf";
pub const DEFAULT_OUTPUT_PATH: &str = "data/city_to_iata.json";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHUNK_SIZE: usize = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Checks shared by every `ConfigProvider`.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_path("input_path", config.input_path())?;
    validation::validate_file_extension("input_path", config.input_path(), &["pdf"])?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_file_extension("output_path", config.output_path(), &["json"])?;
    validation::validate_positive_number("chunk_size", config.chunk_size(), 1)?;

    if config.llm_enabled() {
        validation::validate_url("llm.base_url", config.llm_base_url())?;
        validation::validate_non_empty_string("llm.model", config.llm_model())?;
        validation::validate_range("llm.temperature", config.llm_temperature(), 0.0, 2.0)?;
        validation::validate_positive_number(
            "llm.request_timeout_secs",
            config.request_timeout_secs() as usize,
            1,
        )?;
        validation::validate_required_field("llm.api_key", &config.llm_api_key())?;
    }

    Ok(())
}
