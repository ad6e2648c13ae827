pub mod country_pipeline;
pub mod extraction_pipeline;

pub use country_pipeline::CountryConversionPipeline;
pub use extraction_pipeline::PdfExtractionPipeline;
