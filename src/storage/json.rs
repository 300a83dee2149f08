use crate::model::{CategoryNode, ProductInfo, ProductRecord};
use crate::storage::{resolve_dump_path, StorageError, StorageResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of a product's document
pub const INFO_FILE: &str = "info.json";

/// File name of the category index at the dump root
pub const CATEGORIES_FILE: &str = "categories_list.json";

/// Writes JSON documents into the dump tree
///
/// Every write creates the missing directories first and replaces any
/// existing file; two records with the same directory key end up as
/// whichever was written last. Writes go through `tokio::fs` so the crawl
/// loop never blocks on disk.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    base: PathBuf,
    flatten: bool,
}

impl JsonStorage {
    /// Creates a storage rooted at `base`
    pub fn new(base: impl Into<PathBuf>, flatten: bool) -> Self {
        Self {
            base: base.into(),
            flatten,
        }
    }

    /// Directory for a record, or the dump root for `None`
    pub fn record_dir(&self, record: Option<&ProductRecord>) -> PathBuf {
        resolve_dump_path(&self.base, self.flatten, record)
    }

    /// Serializes `document` as pretty JSON to `dir/file_name`
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The path of the written file
    /// * `Err(StorageError)` - Directory creation, serialization or write failed
    pub async fn write_document<T: Serialize + ?Sized>(
        &self,
        dir: &Path,
        file_name: &str,
        document: &T,
    ) -> StorageResult<PathBuf> {
        let bytes = serde_json::to_vec_pretty(document)?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }

    /// Writes the category tree to `<base>/categories_list.json`
    ///
    /// Always at the dump root, whatever the flatten setting.
    pub async fn save_categories(&self, categories: &[CategoryNode]) -> StorageResult<PathBuf> {
        let dir = self.record_dir(None);
        let path = self.write_document(&dir, CATEGORIES_FILE, categories).await?;
        tracing::debug!(
            "Saved {} categories to {}",
            categories.len(),
            path.display()
        );
        Ok(path)
    }

    /// Writes a record's `info.json` into its resolved directory
    pub async fn save_record(&self, record: &ProductRecord) -> StorageResult<PathBuf> {
        let dir = self.record_dir(Some(record));
        let path = self
            .write_document(&dir, INFO_FILE, &ProductInfo::from(record))
            .await?;
        tracing::debug!("Saved product '{}' to {}", record.name, path.display());
        Ok(path)
    }

    /// Reads an `info.json` back
    pub fn load_info(path: &Path) -> StorageResult<ProductInfo> {
        let content = std::fs::read_to_string(path).map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DescriptionPart, SubcategoryNode};
    use tempfile::TempDir;

    fn sample_record() -> ProductRecord {
        ProductRecord {
            category: "Apparel".to_string(),
            subcategory: "Shirts".to_string(),
            name: "Uniform Tee".to_string(),
            price: "24.99".to_string(),
            id: "STK-42".to_string(),
            description_text: "Soft cotton tee.".to_string(),
            description_list: vec![vec![
                DescriptionPart::Text("Cotton".to_string()),
                DescriptionPart::List(vec![vec![DescriptionPart::Text(
                    "Machine wash".to_string(),
                )]]),
            ]],
            colors: ["Red", "Gold"].iter().map(|s| s.to_string()).collect(),
            sizes: ["S", "M"].iter().map(|s| s.to_string()).collect(),
            image_urls: ["//cdn.example.com/tee.jpg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            images: vec![],
        }
    }

    #[tokio::test]
    async fn test_save_record_layout() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path(), false);

        let path = storage.save_record(&sample_record()).await.unwrap();

        assert_eq!(
            path,
            dir.path().join("Apparel").join("Shirts").join("Uniform Tee").join(INFO_FILE)
        );
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_record_flat_layout() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path(), true);

        let path = storage.save_record(&sample_record()).await.unwrap();

        assert_eq!(path, dir.path().join("Uniform Tee").join(INFO_FILE));
    }

    #[tokio::test]
    async fn test_record_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path(), false);
        let record = sample_record();

        let path = storage.save_record(&record).await.unwrap();
        let info = JsonStorage::load_info(&path).unwrap();

        assert_eq!(info, ProductInfo::from(&record));
    }

    #[tokio::test]
    async fn test_rewrite_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path(), false);
        let record = sample_record();

        let path = storage.save_record(&record).await.unwrap();
        let first = std::fs::read(&path).unwrap();
        storage.save_record(&record).await.unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path(), false);

        let mut record = sample_record();
        storage.save_record(&record).await.unwrap();
        record.price = "19.99".to_string();
        let path = storage.save_record(&record).await.unwrap();

        assert_eq!(JsonStorage::load_info(&path).unwrap().price, "19.99");
    }

    #[tokio::test]
    async fn test_save_categories_at_root_even_when_flat() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path().join("nested").join("dumps"), true);
        let tree = vec![CategoryNode {
            name: "Apparel".to_string(),
            link: "/collections/apparel".to_string(),
            subcategories: vec![SubcategoryNode {
                name: "Shirts".to_string(),
                link: "/collections/shirts".to_string(),
            }],
        }];

        let path = storage.save_categories(&tree).await.unwrap();

        assert_eq!(path, dir.path().join("nested").join("dumps").join(CATEGORIES_FILE));
        let written: Vec<CategoryNode> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, tree);
    }

    #[tokio::test]
    async fn test_create_dir_failure_propagates() {
        let dir = TempDir::new().unwrap();
        // A regular file where the dump root should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let storage = JsonStorage::new(&blocker, false);

        let result = storage.save_record(&sample_record()).await;
        assert!(matches!(result, Err(StorageError::CreateDir { .. })));
    }
}
