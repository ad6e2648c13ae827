pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod country;
pub mod domain;
pub mod extract;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::adapters::{CelesCountryLookup, LocalStorage, OpenAiClient, PdfTextExtractor};
pub use crate::app::pipelines::{CountryConversionPipeline, PdfExtractionPipeline};
pub use crate::core::etl::EtlEngine;
pub use crate::country::CountryNormalizer;
pub use crate::domain::model::{CityRecord, IataCode, ResultSet};
pub use utils::error::{EtlError, Result};
