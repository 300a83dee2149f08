use crate::crawler::ImageFetcher;
use crate::model::{DownloadedImage, ProductRecord};
use crate::storage::resolve_dump_path;
use crate::url::{absolute_image_url, file_name_from_url};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Signal that a record has nothing to download
///
/// Not a failure: the record itself is still persisted, it just gets no
/// images.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Item contains no images: {name}")]
pub struct DropRecord {
    pub name: String,
}

/// One image to fetch for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Fetchable URL (`https:` prefixed)
    pub url: String,
    /// Directory of the owning record
    pub dir: PathBuf,
}

/// A download that did not produce a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    pub url: String,
    pub reason: String,
    /// The destination is already a regular file from an earlier run
    pub completed: bool,
}

pub type ImageResult = Result<DownloadedImage, ImageFailure>;

/// Resolves image destinations and runs the downloads
#[derive(Debug, Clone)]
pub struct ImagePipeline {
    base: PathBuf,
    flatten: bool,
}

impl ImagePipeline {
    pub fn new(base: impl Into<PathBuf>, flatten: bool) -> Self {
        Self {
            base: base.into(),
            flatten,
        }
    }

    /// Builds one request per image URL of `record`
    ///
    /// # Returns
    ///
    /// * `Ok(requests)` - At least one request
    /// * `Err(DropRecord)` - The record has no image URLs
    pub fn media_requests(&self, record: &ProductRecord) -> Result<Vec<ImageRequest>, DropRecord> {
        if record.image_urls.is_empty() {
            return Err(DropRecord {
                name: record.name.clone(),
            });
        }

        let dir = resolve_dump_path(&self.base, self.flatten, Some(record));
        Ok(record
            .image_urls
            .iter()
            .map(|raw| ImageRequest {
                url: absolute_image_url(raw),
                dir: dir.clone(),
            })
            .collect())
    }

    /// Destination file of a request: record directory plus the URL's file name
    pub fn file_path(&self, request: &ImageRequest) -> PathBuf {
        request.dir.join(file_name_from_url(&request.url))
    }

    /// Fetches one image and writes it to its destination
    pub async fn download<F: ImageFetcher>(&self, fetcher: &F, request: &ImageRequest) -> ImageResult {
        let path = self.file_path(request);

        let bytes = match fetcher.fetch_image(&request.url).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.failure(request, &path, e.to_string()).await),
        };

        if let Err(e) = write_image(&request.dir, &path, &bytes).await {
            return Err(self.failure(request, &path, e.to_string()).await);
        }

        tracing::debug!("Saved image {} to {}", request.url, path.display());
        Ok(DownloadedImage {
            url: request.url.clone(),
            path,
            checksum: hex::encode(Sha256::digest(&bytes)),
        })
    }

    async fn failure(&self, request: &ImageRequest, path: &Path, reason: String) -> ImageFailure {
        let completed = tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        ImageFailure {
            url: request.url.clone(),
            reason,
            completed,
        }
    }

    /// Folds download results back into the record
    ///
    /// Failures are logged, never raised. A failure whose destination already
    /// exists counts as complete and stays quiet.
    pub fn item_completed(&self, results: Vec<ImageResult>, record: &mut ProductRecord) {
        for result in results {
            match result {
                Ok(image) => record.images.push(image),
                Err(failure) if failure.completed => {
                    tracing::debug!(
                        "Image {} for item {} already on disk",
                        failure.url,
                        record.name
                    );
                }
                Err(failure) => {
                    tracing::error!(
                        "Failed to download image {} for item {}: {}",
                        failure.url,
                        record.name,
                        failure.reason
                    );
                }
            }
        }
    }

    /// Downloads every image of `record` concurrently
    ///
    /// Each download holds a permit of `semaphore` while it runs, so image
    /// traffic shares the request budget with page fetches.
    pub async fn process<F>(
        &self,
        fetcher: Arc<F>,
        semaphore: Arc<Semaphore>,
        mut record: ProductRecord,
    ) -> ProductRecord
    where
        F: ImageFetcher + 'static,
    {
        let requests = match self.media_requests(&record) {
            Ok(requests) => requests,
            Err(drop) => {
                tracing::warn!("{}", drop);
                return record;
            }
        };

        let mut tasks = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let pipeline = self.clone();
            let fetcher = Arc::clone(&fetcher);
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                (index, pipeline.download(fetcher.as_ref(), &request).await)
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::warn!("Image task for item {} failed: {}", record.name, e),
            }
        }
        results.sort_by_key(|(index, _)| *index);

        self.item_completed(results.into_iter().map(|(_, r)| r).collect(), &mut record);
        record
    }
}

async fn write_image(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, bytes).await
}
