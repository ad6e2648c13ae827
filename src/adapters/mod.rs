// Adapters layer: concrete implementations for external systems
// (storage, pdf, http, country table).

pub mod country;
pub mod openai;
pub mod pdf;
pub mod storage;

pub use country::CelesCountryLookup;
pub use openai::OpenAiClient;
pub use pdf::PdfTextExtractor;
pub use storage::LocalStorage;
