pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{
    etl::FragmentEngine,
    parser::{FragmentParser, MarkerSyntax},
    pipeline::FragmentPipeline,
};
pub use domain::model::{ExtractionResult, FragmentMap, FragmentSection, MarkerKind};
pub use utils::error::{FragmentError, Result};
