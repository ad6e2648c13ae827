use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn chunk_size(&self) -> usize;
    fn llm_enabled(&self) -> bool;
    fn llm_model(&self) -> &str;
    fn llm_base_url(&self) -> &str;
    fn llm_api_key(&self) -> Option<&str>;
    fn llm_temperature(&self) -> f32;
    fn request_timeout_secs(&self) -> u64;
}

/// Turns raw PDF bytes into one text string per page, in page order.
pub trait PageSource: Send + Sync {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>>;
}

/// A prompt/completion service. Returns the raw text of the model's answer.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Reference table of ISO 3166 country codes.
pub trait CountryLookup: Send + Sync {
    fn by_alpha2(&self, code: &str) -> Option<String>;
    fn by_alpha3(&self, code: &str) -> Option<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Extracted: Send;
    type Transformed: Send;

    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    async fn load(&self, result: Self::Transformed) -> Result<String>;
}
