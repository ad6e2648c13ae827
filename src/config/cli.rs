use crate::config::{
    validate_provider, DEFAULT_BASE_URL, DEFAULT_CHUNK_SIZE, DEFAULT_MODEL, DEFAULT_OUTPUT_PATH,
    DEFAULT_PDF_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Clone, Parser)]
#[command(name = "city-iata")]
#[command(about = "Extract a city to IATA code table from a PDF reference document")]
pub struct CliConfig {
    /// PDF to read, relative to --base-dir
    #[arg(long, default_value = DEFAULT_PDF_PATH)]
    pub input_path: String,

    /// JSON file to write, relative to --base-dir
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = ".")]
    pub base_dir: String,

    /// Read settings from a TOML file instead of the flags below
    #[arg(short, long)]
    pub config: Option<String>,

    /// Characters per LLM request
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Run only the regex passes
    #[arg(long)]
    pub skip_llm: bool,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value_t = 0.0)]
    pub temperature: f32,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("base_dir", &self.base_dir)
            .field("config", &self.config)
            .field("chunk_size", &self.chunk_size)
            .field("skip_llm", &self.skip_llm)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn llm_enabled(&self) -> bool {
        !self.skip_llm
    }

    fn llm_model(&self) -> &str {
        &self.model
    }

    fn llm_base_url(&self) -> &str {
        &self.base_url
    }

    fn llm_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    fn llm_temperature(&self) -> f32 {
        self.temperature
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
