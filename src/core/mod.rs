pub mod etl;
pub mod parser;
pub mod pipeline;
pub mod text;

pub use crate::domain::model::{ExtractionResult, FragmentMap, SourceFile};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
