pub mod config;
pub mod core;
pub mod domain;
pub mod tagging;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{etl::EtlEngine, pipeline::TaggingPipeline};
pub use domain::model::{
    CatalogSheet, Classification, Dimension, Item, ResolutionTier, Tag, TagList, TaggingStats,
};
pub use tagging::{classify, Explanation, Tagger};
pub use utils::error::{Result, TaggerError};
