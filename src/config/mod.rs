pub mod cli;
pub mod toml_config;

use crate::domain::ports::{ColumnNames, ConfigProvider};
use crate::tagging::lexicon::DEFAULT_MANAGED_VENDOR;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_paths, validate_file_extension, validate_non_empty_string, validate_path,
    Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "catalog-tagger"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Generate facet tags for a product catalog export")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, short, help = "Catalog CSV export to read"))]
    pub input: String,

    #[cfg_attr(feature = "cli", arg(long, short, help = "Where to write the tagged CSV"))]
    pub output: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_MANAGED_VENDOR))]
    pub vendor: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = ", "))]
    pub tag_separator: String,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Classify rows on a single thread")
    )]
    pub sequential: bool,

    #[cfg_attr(feature = "cli", arg(long, short, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn managed_vendor(&self) -> &str {
        &self.vendor
    }

    fn tag_separator(&self) -> &str {
        &self.tag_separator
    }

    fn columns(&self) -> ColumnNames {
        ColumnNames::default()
    }

    fn parallel(&self) -> bool {
        !self.sequential
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_file_extension("input", &self.input, &["csv"])?;
        validate_path("output", &self.output)?;
        validate_distinct_paths("output", &self.input, &self.output)?;
        validate_non_empty_string("vendor", self.vendor.trim())?;
        validate_non_empty_string("tag_separator", &self.tag_separator)?;
        Ok(())
    }
}
