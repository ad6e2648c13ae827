use crate::country::CountryNormalizer;
use crate::domain::model::ConversionResult;
use crate::domain::ports::{CountryLookup, Pipeline, Storage};
use crate::utils::error::{EtlError, Result};

/// Rewrites country codes in a `{city: {country: code, ...}}` JSON file as full names.
pub struct CountryConversionPipeline<S: Storage, L: CountryLookup> {
    pub(crate) storage: S,
    normalizer: CountryNormalizer<L>,
    input_path: String,
    output_path: String,
}

impl<S: Storage, L: CountryLookup> CountryConversionPipeline<S, L> {
    pub fn new(
        storage: S,
        normalizer: CountryNormalizer<L>,
        input_path: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            normalizer,
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, L: CountryLookup> Pipeline for CountryConversionPipeline<S, L> {
    type Extracted = serde_json::Map<String, serde_json::Value>;
    type Transformed = ConversionResult;

    async fn extract(&self) -> Result<Self::Extracted> {
        tracing::info!("Loading JSON from {}", self.input_path);
        let bytes = self.storage.read_file(&self.input_path).await?;

        match serde_json::from_slice(&bytes)? {
            serde_json::Value::Object(map) => {
                tracing::info!("Found {} entries in the JSON file", map.len());
                Ok(map)
            }
            other => Err(EtlError::ProcessingError {
                message: format!(
                    "expected a JSON object keyed by city, found {}",
                    json_type_name(&other)
                ),
            }),
        }
    }

    async fn transform(&self, mut document: Self::Extracted) -> Result<ConversionResult> {
        let converted = self.normalizer.convert_document(&mut document);
        tracing::info!("Converted {} country codes to full names", converted);

        Ok(ConversionResult {
            document,
            converted,
        })
    }

    async fn load(&self, result: ConversionResult) -> Result<String> {
        let json = serde_json::to_string_pretty(&result.document)?;
        self.storage.write_file(&self.output_path, json.as_bytes()).await?;

        tracing::info!("Updated JSON saved to {}", self.output_path);
        Ok(self.output_path.clone())
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
