use crate::config::{
    validate_provider, DEFAULT_BASE_URL, DEFAULT_CHUNK_SIZE, DEFAULT_MODEL, DEFAULT_OUTPUT_PATH,
    DEFAULT_PDF_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub countries: CountriesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_pdf_path")]
    pub pdf_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesConfig {
    #[serde(default = "default_countries_input")]
    pub input_path: String,
    #[serde(default = "default_countries_output")]
    pub output_path: String,
    /// Extra code → name entries, checked after the ISO table.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_pdf_path() -> String {
    DEFAULT_PDF_PATH.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_countries_input() -> String {
    "data/city_to_iata2.json".to_string()
}

fn default_countries_output() -> String {
    "data/city_to_iata_full_countries.json".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pdf_path: default_pdf_path(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            base_url: default_base_url(),
            api_key: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            temperature: 0.0,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("enabled", &self.enabled)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("chunk_size", &self.chunk_size)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            input_path: default_countries_input(),
            output_path: default_countries_output(),
            overrides: HashMap::new(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn country_overrides(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.countries
            .overrides
            .iter()
            .map(|(code, name)| (code.clone(), name.clone()))
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.pdf_path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn chunk_size(&self) -> usize {
        self.llm.chunk_size
    }

    fn llm_enabled(&self) -> bool {
        self.llm.enabled
    }

    fn llm_model(&self) -> &str {
        &self.llm.model
    }

    fn llm_base_url(&self) -> &str {
        &self.llm.base_url
    }

    fn llm_api_key(&self) -> Option<&str> {
        // an unresolved ${VAR} counts as unset
        self.llm
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty() && !ENV_VAR.is_match(key))
    }

    fn llm_temperature(&self) -> f32 {
        self.llm.temperature
    }

    fn request_timeout_secs(&self) -> u64 {
        self.llm.request_timeout_secs
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        self.validate_countries()
    }
}

impl TomlConfig {
    /// Checks only the `[countries]` section.
    pub fn validate_countries(&self) -> Result<()> {
        validation::validate_path("countries.input_path", &self.countries.input_path)?;
        validation::validate_path("countries.output_path", &self.countries.output_path)?;

        for (code, name) in &self.countries.overrides {
            if !crate::country::looks_like_country_code(code) {
                return Err(EtlError::InvalidConfigValueError {
                    field: "countries.overrides".to_string(),
                    value: code.clone(),
                    reason: "Override keys must be 2 or 3 letters".to_string(),
                });
            }
            validation::validate_non_empty_string("countries.overrides", name)?;
        }

        Ok(())
    }
}
