use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    CatalogSheet, Item, ProductTags, Record, TaggingStats, TransformResult,
};
use crate::domain::ports::ColumnNames;
use crate::tagging::{Explanation, Tagger};
use crate::utils::error::{Result, TaggerError};
use crate::utils::text::normalize_html;
use rayon::prelude::*;
use std::collections::HashSet;

/// Column positions resolved against the sheet header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    handle: usize,
    title: usize,
    body: Option<usize>,
    product_type: usize,
    vendor: usize,
    tags: usize,
}

impl ColumnIndex {
    fn resolve(sheet: &CatalogSheet, names: &ColumnNames) -> Result<Self> {
        let require = |name: &str| {
            sheet.column(name).ok_or_else(|| TaggerError::MissingColumn {
                column: name.to_string(),
            })
        };

        Ok(Self {
            handle: require(&names.handle)?,
            title: require(&names.title)?,
            body: sheet.column(&names.body),
            product_type: require(&names.product_type)?,
            vendor: require(&names.vendor)?,
            tags: require(&names.tags)?,
        })
    }
}

/// What a row turned out to be during classification.
enum RowOutcome {
    /// Main product row (handle and title present).
    Product(Option<Explanation>),
    /// Image/variant row belonging to a product (handle only).
    Variant,
    Other,
}

pub struct TaggingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    tagger: Tagger,
}

impl<S: Storage, C: ConfigProvider> TaggingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let tagger = Tagger::new(config.managed_vendor());
        Self {
            storage,
            config,
            tagger,
        }
    }
}

/// Product rows need a non-empty handle and title cell. Emptiness is
/// judged on the raw cells; `Tagger::explain` trims the title itself.
fn classify_row(tagger: &Tagger, record: &Record, columns: &ColumnIndex) -> RowOutcome {
    let handle = record.get(columns.handle);
    let title = record.get(columns.title);

    match (handle.is_empty(), title.is_empty()) {
        (false, false) => {
            let body = columns
                .body
                .map(|i| normalize_html(record.get(i)))
                .unwrap_or_default();
            let item = Item::new(
                title,
                body,
                record.get(columns.product_type),
                record.get(columns.vendor),
            );
            RowOutcome::Product(tagger.explain(&item))
        }
        (false, true) => RowOutcome::Variant,
        _ => RowOutcome::Other,
    }
}

fn classify_rows(
    tagger: &Tagger,
    records: &[Record],
    columns: &ColumnIndex,
    parallel: bool,
) -> Vec<RowOutcome> {
    // 分類只依賴單列內容，可平行處理；rayon 的 collect 會保留原始順序
    if parallel {
        records
            .par_iter()
            .map(|record| classify_row(tagger, record, columns))
            .collect()
    } else {
        records
            .iter()
            .map(|record| classify_row(tagger, record, columns))
            .collect()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TaggingPipeline<S, C> {
    async fn extract(&self) -> Result<CatalogSheet> {
        tracing::debug!("Reading catalog from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        let sheet = parse_catalog(&data)?;

        // 先檢查必要欄位，避免處理到一半才失敗
        ColumnIndex::resolve(&sheet, &self.config.columns())?;
        tracing::debug!("Catalog has {} columns", sheet.headers.len());

        Ok(sheet)
    }

    async fn transform(&self, mut sheet: CatalogSheet) -> Result<TransformResult> {
        let columns = ColumnIndex::resolve(&sheet, &self.config.columns())?;

        // CPU 密集的分類移到 blocking 執行緒，避免佔住 tokio worker
        let tagger = self.tagger.clone();
        let parallel = self.config.parallel();
        let records = std::mem::take(&mut sheet.records);
        let (records, outcomes) = tokio::task::spawn_blocking(move || {
            let outcomes = classify_rows(&tagger, &records, &columns, parallel);
            (records, outcomes)
        })
        .await
        .map_err(|e| TaggerError::ProcessingError {
            message: format!("Classification task failed: {}", e),
        })?;
        sheet.records = records;

        let separator = self.config.tag_separator();
        let mut stats = TaggingStats::default();
        let mut products = Vec::new();
        let mut tagged_handles = HashSet::new();

        // 依列順序處理 handle 記錄：圖片/變體列只在主商品已標記後才清空
        for (record, outcome) in sheet.records.iter_mut().zip(outcomes) {
            match outcome {
                RowOutcome::Product(Some(explanation)) => {
                    let handle = record.get(columns.handle).to_string();
                    record.set(columns.tags, explanation.tags.join(separator));
                    *stats.tiers.entry(explanation.tier).or_insert(0) += 1;
                    stats.products_tagged += 1;
                    tagged_handles.insert(handle.clone());
                    products.push(ProductTags {
                        handle,
                        tier: explanation.tier,
                        tags: explanation.tags,
                    });
                }
                RowOutcome::Product(None) => stats.not_applicable += 1,
                RowOutcome::Variant => {
                    if tagged_handles.contains(record.get(columns.handle)) {
                        record.set(columns.tags, String::new());
                        stats.variants_cleared += 1;
                    } else {
                        stats.passthrough += 1;
                    }
                }
                RowOutcome::Other => stats.passthrough += 1,
            }
        }

        Ok(TransformResult {
            sheet,
            stats,
            products,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        let data = write_catalog(&result.sheet)?;

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(&output_path, &data).await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ResolutionTier;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                TaggerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        columns: ColumnNames,
        parallel: bool,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                columns: ColumnNames::default(),
                parallel: true,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "in.csv"
        }

        fn output_path(&self) -> &str {
            "out.csv"
        }

        fn managed_vendor(&self) -> &str {
            "What You Need"
        }

        fn tag_separator(&self) -> &str {
            ", "
        }

        fn columns(&self) -> ColumnNames {
            self.columns.clone()
        }

        fn parallel(&self) -> bool {
            self.parallel
        }
    }

    const CATALOG: &str = "\
Handle,Title,Body (HTML),Vendor,Type,Tags,Image Src
glass-ashtray,Glass Ashtray,<p>Heavy glass</p>,What You Need,Rolling Papers,old,a.jpg
glass-ashtray,,,,,,b.jpg
other-bong,Beaker Bong,,Someone Else,Bongs & Water Pipes,keep-me,c.jpg
other-bong,,,,,,d.jpg
,,,,,,e.jpg
";

    fn tags_column(sheet: &CatalogSheet) -> Vec<String> {
        let idx = sheet.column("Tags").unwrap();
        sheet.records.iter().map(|r| r.get(idx).to_string()).collect()
    }

    #[tokio::test]
    async fn test_extract_keeps_all_columns() {
        let storage = MockStorage::with_file("in.csv", CATALOG);
        let pipeline = TaggingPipeline::new(storage, MockConfig::new());

        let sheet = pipeline.extract().await.unwrap();

        assert_eq!(sheet.headers.len(), 7);
        assert_eq!(sheet.headers[6], "Image Src");
        assert_eq!(sheet.records.len(), 5);
        assert_eq!(sheet.records[0].get(2), "<p>Heavy glass</p>");
    }

    #[tokio::test]
    async fn test_extract_missing_column() {
        let storage = MockStorage::with_file("in.csv", "Handle,Title,Vendor,Tags\na,b,c,d\n");
        let pipeline = TaggingPipeline::new(storage, MockConfig::new());

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, TaggerError::MissingColumn { ref column } if column == "Type"));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let storage = MockStorage::with_file("elsewhere.csv", CATALOG);
        let pipeline = TaggingPipeline::new(storage, MockConfig::new());

        assert!(matches!(
            pipeline.extract().await,
            Err(TaggerError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_transform_row_bookkeeping() {
        let storage = MockStorage::with_file("in.csv", CATALOG);
        let pipeline = TaggingPipeline::new(storage, MockConfig::new());
        let sheet = pipeline.extract().await.unwrap();

        let result = pipeline.transform(sheet).await.unwrap();
        let tags = tags_column(&result.sheet);

        assert!(tags[0].starts_with("pillar:accessory, family:tray"));
        assert_eq!(tags[1], "");
        assert_eq!(tags[2], "keep-me");
        assert_eq!(tags[3], "");
        assert_eq!(tags[4], "");

        assert_eq!(result.stats.products_tagged, 1);
        assert_eq!(result.stats.not_applicable, 1);
        assert_eq!(result.stats.variants_cleared, 1);
        assert_eq!(result.stats.passthrough, 2);
        assert_eq!(
            result.stats.tiers.get(&ResolutionTier::ContentOverride),
            Some(&1)
        );

        assert_eq!(result.products.len(), 1);
        assert_eq!(result.products[0].handle, "glass-ashtray");
    }

    #[tokio::test]
    async fn test_body_html_is_normalized_before_tagging() {
        let catalog = "\
Handle,Title,Body (HTML),Vendor,Type,Tags
spoon,Spoon,<p>Material:&nbsp;<b>Quartz</b></p>,What You Need,Hand Pipes,
";
        let storage = MockStorage::with_file("in.csv", catalog);
        let pipeline = TaggingPipeline::new(storage, MockConfig::new());
        let sheet = pipeline.extract().await.unwrap();

        let result = pipeline.transform(sheet).await.unwrap();
        assert!(result.products[0].tags.contains("material:quartz"));
        assert!(!result.products[0].tags.contains("material:glass"));
    }

    #[tokio::test]
    async fn test_whitespace_title_is_still_a_product() {
        let catalog = "\
Handle,Title,Body (HTML),Vendor,Type,Tags
blank-title,   ,,What You Need,Mystery,old
blank-title,,,,,old-variant
";
        let storage = MockStorage::with_file("in.csv", catalog);
        let pipeline = TaggingPipeline::new(storage, MockConfig::new());
        let sheet = pipeline.extract().await.unwrap();

        let result = pipeline.transform(sheet).await.unwrap();
        let tags = tags_column(&result.sheet);

        assert!(tags[0].starts_with("pillar:accessory, family:storage-accessory"));
        assert_eq!(tags[1], "");
        assert_eq!(result.stats.products_tagged, 1);
        assert_eq!(result.stats.variants_cleared, 1);
        assert_eq!(result.products[0].tier, ResolutionTier::Fallback);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_transform_off_runtime_keeps_row_order() {
        let mut catalog = String::from("Handle,Title,Body (HTML),Vendor,Type,Tags\n");
        for i in 0..200 {
            let product_type = if i % 2 == 0 { "Hand Pipes" } else { "Torches" };
            catalog.push_str(&format!("item-{i},Item {i},,What You Need,{product_type},\n"));
        }
        let storage = MockStorage::with_file("in.csv", &catalog);
        let pipeline = TaggingPipeline::new(storage, MockConfig::new());
        let sheet = pipeline.extract().await.unwrap();

        let result = pipeline.transform(sheet).await.unwrap();

        assert_eq!(result.sheet.records.len(), 200);
        assert_eq!(result.stats.products_tagged, 200);
        for (i, product) in result.products.iter().enumerate() {
            assert_eq!(product.handle, format!("item-{i}"));
            let family = if i % 2 == 0 { "family:spoon-pipe" } else { "family:torch" };
            assert!(product.tags.contains(family), "row {i}: {}", product.tags.join(", "));
        }
    }

    #[tokio::test]
    async fn test_sequential_and_parallel_agree() {
        let storage = MockStorage::with_file("in.csv", CATALOG);
        let parallel = TaggingPipeline::new(storage.clone(), MockConfig::new());
        let mut config = MockConfig::new();
        config.parallel = false;
        let sequential = TaggingPipeline::new(storage, config);

        let a = parallel
            .transform(parallel.extract().await.unwrap())
            .await
            .unwrap();
        let b = sequential
            .transform(sequential.extract().await.unwrap())
            .await
            .unwrap();

        assert_eq!(a.sheet, b.sheet);
        assert_eq!(a.stats, b.stats);
    }

    #[tokio::test]
    async fn test_custom_column_names() {
        let catalog = "\
Slug,Name,Brand Owner,Category,Labels
torch,Butane Torch,What You Need,Torches,
";
        let storage = MockStorage::with_file("in.csv", catalog);
        let mut config = MockConfig::new();
        config.columns = ColumnNames {
            handle: "Slug".to_string(),
            title: "Name".to_string(),
            body: "Description".to_string(),
            product_type: "Category".to_string(),
            vendor: "Brand Owner".to_string(),
            tags: "Labels".to_string(),
        };
        let pipeline = TaggingPipeline::new(storage, config);

        let result = pipeline
            .transform(pipeline.extract().await.unwrap())
            .await
            .unwrap();
        assert_eq!(
            result.sheet.records[0].get(4),
            "pillar:accessory, family:torch, material:metal, format:torch, use:dabbing"
        );
    }

    #[tokio::test]
    async fn test_load_writes_csv_in_header_order() {
        let storage = MockStorage::with_file("in.csv", CATALOG);
        let pipeline = TaggingPipeline::new(storage.clone(), MockConfig::new());
        let sheet = pipeline.extract().await.unwrap();
        let result = pipeline.transform(sheet).await.unwrap();

        let output_path = pipeline.load(result).await.unwrap();
        assert_eq!(output_path, "out.csv");

        let written = storage.get_file("out.csv").await.unwrap();
        let reparsed = parse_catalog(&written).unwrap();
        assert_eq!(
            reparsed.headers,
            vec!["Handle", "Title", "Body (HTML)", "Vendor", "Type", "Tags", "Image Src"]
        );
        assert_eq!(reparsed.records.len(), 5);
        assert_eq!(reparsed.records[2].get(5), "keep-me");
    }

    #[test]
    fn test_write_catalog_pads_short_rows() {
        let sheet = CatalogSheet {
            headers: vec!["Handle".to_string(), "Tags".to_string()],
            records: vec![Record {
                values: vec!["only-handle".to_string()],
            }],
        };
        let data = write_catalog(&sheet).unwrap();
        assert_eq!(String::from_utf8(data).unwrap(), "Handle,Tags\nonly-handle,\n");
    }

    #[test]
    fn test_tags_with_commas_are_quoted() {
        let sheet = CatalogSheet {
            headers: vec!["Tags".to_string()],
            records: vec![Record {
                values: vec!["pillar:merch, family:merch-pendant".to_string()],
            }],
        };
        let data = write_catalog(&sheet).unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "Tags\n\"pillar:merch, family:merch-pendant\"\n"
        );
    }
}
