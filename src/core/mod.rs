pub mod etl;

pub use crate::domain::model::{CityRecord, ExtractionResult, ResultSet};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
