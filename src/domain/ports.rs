use crate::domain::model::{CatalogSheet, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Column header names of the catalog export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub handle: String,
    pub title: String,
    pub body: String,
    pub product_type: String,
    pub vendor: String,
    pub tags: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            handle: "Handle".to_string(),
            title: "Title".to_string(),
            body: "Body (HTML)".to_string(),
            product_type: "Type".to_string(),
            vendor: "Vendor".to_string(),
            tags: "Tags".to_string(),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn managed_vendor(&self) -> &str;
    fn tag_separator(&self) -> &str;
    fn columns(&self) -> ColumnNames;
    fn parallel(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CatalogSheet>;
    async fn transform(&self, sheet: CatalogSheet) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
