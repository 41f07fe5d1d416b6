use crate::core::ConfigProvider;
use crate::domain::ports::ColumnNames;
use crate::tagging::lexicon::DEFAULT_MANAGED_VENDOR;
use crate::utils::error::{Result, TaggerError};
use crate::utils::validation::{
    validate_distinct_paths, validate_file_extension, validate_non_empty_string, validate_path,
    validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub catalog: Option<CatalogConfig>,
    pub columns: Option<ColumnsConfig>,
    pub load: LoadConfig,
    pub performance: Option<PerformanceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub managed_vendor: Option<String>,
}

/// 欄位名稱覆寫，未設定者使用預設的匯出欄位名稱
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnsConfig {
    pub handle: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub product_type: Option<String>,
    pub vendor: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub tag_separator: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub parallel: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| TaggerError::ConfigError {
                message: format!("Cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        let config = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${CATALOG_DIR})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn pipeline_name(&self) -> &str {
        &self.pipeline.name
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn managed_vendor(&self) -> &str {
        self.catalog
            .as_ref()
            .and_then(|c| c.managed_vendor.as_deref())
            .unwrap_or(DEFAULT_MANAGED_VENDOR)
    }

    fn tag_separator(&self) -> &str {
        self.load.tag_separator.as_deref().unwrap_or(", ")
    }

    fn columns(&self) -> ColumnNames {
        let defaults = ColumnNames::default();
        let Some(overrides) = self.columns.as_ref() else {
            return defaults;
        };
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);

        ColumnNames {
            handle: pick(&overrides.handle, defaults.handle),
            title: pick(&overrides.title, defaults.title),
            body: pick(&overrides.body, defaults.body),
            product_type: pick(&overrides.product_type, defaults.product_type),
            vendor: pick(&overrides.vendor, defaults.vendor),
            tags: pick(&overrides.tags, defaults.tags),
        }
    }

    fn parallel(&self) -> bool {
        self.performance
            .as_ref()
            .and_then(|p| p.parallel)
            .unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("pipeline.name", self.pipeline.name.trim())?;

        // 驗證輸入與輸出路徑
        validate_path("source.input_path", &self.source.input_path)?;
        validate_file_extension("source.input_path", &self.source.input_path, &["csv"])?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_distinct_paths(
            "load.output_path",
            &self.source.input_path,
            &self.load.output_path,
        )?;

        // 有 [catalog] 區段就必須指定 managed_vendor
        if let Some(catalog) = &self.catalog {
            validate_required_field("catalog.managed_vendor", &catalog.managed_vendor)?;
        }
        validate_non_empty_string("catalog.managed_vendor", self.managed_vendor().trim())?;
        validate_non_empty_string("load.tag_separator", self.tag_separator())?;

        let columns = self.columns();
        for (field, name) in [
            ("columns.handle", &columns.handle),
            ("columns.title", &columns.title),
            ("columns.body", &columns.body),
            ("columns.product_type", &columns.product_type),
            ("columns.vendor", &columns.vendor),
            ("columns.tags", &columns.tags),
        ] {
            validate_non_empty_string(field, name.trim())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[pipeline]
name = "weekly-retag"
description = "Retag the storefront export"
version = "1.0.0"

[source]
input_path = "exports/products.csv"

[load]
output_path = "exports/products_tagged.csv"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.pipeline_name(), "weekly-retag");
        assert_eq!(config.input_path(), "exports/products.csv");
        assert_eq!(config.output_path(), "exports/products_tagged.csv");
        assert_eq!(config.managed_vendor(), "what you need");
        assert_eq!(config.tag_separator(), ", ");
        assert_eq!(config.columns(), ColumnNames::default());
        assert!(config.parallel());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_sections() {
        let toml_content = r#"
[pipeline]
name = "custom"

[source]
input_path = "in.csv"

[catalog]
managed_vendor = "Acme Glass"

[columns]
body = "Description"
tags = "Labels"

[load]
output_path = "out.csv"
tag_separator = "|"

[performance]
parallel = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let columns = config.columns();

        assert_eq!(config.managed_vendor(), "Acme Glass");
        assert_eq!(config.tag_separator(), "|");
        assert_eq!(columns.body, "Description");
        assert_eq!(columns.tags, "Labels");
        assert_eq!(columns.title, "Title");
        assert!(!config.parallel());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CATALOG_TAGGER_TEST_DIR", "/data/exports");

        let toml_content = r#"
[pipeline]
name = "env"

[source]
input_path = "${CATALOG_TAGGER_TEST_DIR}/products.csv"

[load]
output_path = "${CATALOG_TAGGER_TEST_UNSET}/tagged.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_path(), "/data/exports/products.csv");
        assert_eq!(config.output_path(), "${CATALOG_TAGGER_TEST_UNSET}/tagged.csv");

        std::env::remove_var("CATALOG_TAGGER_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[pipeline]
name = "bad"

[source]
input_path = "products.xlsx"

[load]
output_path = "out.csv"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[pipeline]
name = "bad"

[source]
input_path = "products.csv"

[load]
output_path = "products.csv"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_is_toml_error() {
        let err = TomlConfig::from_toml_str("[pipeline]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, TaggerError::TomlError(_)));
    }

    #[test]
    fn test_empty_catalog_section_is_rejected() {
        let toml_content = format!("{}\n[catalog]\n", BASIC);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(TaggerError::MissingConfigError { ref field }) if field == "catalog.managed_vendor"
        ));
    }

    #[test]
    fn test_unreadable_file_is_config_error() {
        let err = TomlConfig::from_file("/nonexistent/tagger.toml").unwrap_err();
        assert!(matches!(err, TaggerError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline_name(), "weekly-retag");
    }
}
