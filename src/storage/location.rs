//! Storage location parsing and access

use crate::error::{Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

/// A storage location parsed from a URL
///
/// Wraps an [`ObjectStore`] plus the prefix inside it that this location
/// refers to. Both input and output locations are expressed this way, so
/// pipelines read and write through one interface regardless of backend.
#[derive(Debug, Clone)]
pub struct StorageLocation {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket (or local root)
    prefix: String,
    /// Original URL scheme for logging
    scheme: String,
}

impl StorageLocation {
    /// Parse a location URL and create the appropriate object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `/local/path/` or `./path/` - Local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url)
        } else {
            Self::parse_local(url)
        }
    }

    /// Parse an S3 URL
    ///
    /// Credentials and region come from the environment, which the job
    /// populates from the credentials file before any location is parsed.
    fn parse_s3(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("s3://")
            .ok_or_else(|| Error::config(format!("Invalid s3 URL: {url}")))?;

        let (bucket, prefix) = match without_scheme.find('/') {
            Some(idx) => (
                &without_scheme[..idx],
                without_scheme[idx + 1..].trim_end_matches('/').to_string(),
            ),
            None => (without_scheme, String::new()),
        };

        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create s3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
        })
    }

    /// Parse a local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        // The root must exist before LocalFileSystem can be built
        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud location (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (s3, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Resolve a relative path against this location's prefix
    fn resolve(&self, rel: &str) -> ObjectPath {
        let rel = rel.trim_matches('/');
        if self.prefix.is_empty() {
            ObjectPath::from(rel)
        } else if rel.is_empty() {
            ObjectPath::from(self.prefix.as_str())
        } else {
            ObjectPath::from(format!("{}/{rel}", self.prefix))
        }
    }

    /// List all `.json` files under a relative prefix, at any nesting depth
    ///
    /// Paths come back sorted so downstream record order is deterministic
    /// across runs against unchanged inputs.
    pub async fn list_json_files(&self, rel_prefix: &str) -> Result<Vec<ObjectPath>> {
        let prefix = self.resolve(rel_prefix);
        let mut files: Vec<ObjectPath> = self
            .store
            .list(Some(&prefix))
            .map_ok(|meta| meta.location)
            .try_collect::<Vec<_>>()
            .await?
            .into_iter()
            .filter(|p| p.as_ref().ends_with(".json"))
            .collect();

        if files.is_empty() {
            return Err(Error::empty_input(prefix.to_string()));
        }

        files.sort_unstable_by(|a, b| a.as_ref().cmp(b.as_ref()));
        Ok(files)
    }

    /// Read the full contents of an object
    pub async fn get(&self, path: &ObjectPath) -> Result<Bytes> {
        let result = self.store.get(path).await?;
        Ok(result.bytes().await?)
    }

    /// Write bytes to a relative path
    pub async fn put(&self, rel_path: &str, data: Bytes) -> Result<String> {
        let path = self.resolve(rel_path);
        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::storage(format!("Failed to write {path}: {e}")))?;
        Ok(format!("{}://{path}", self.scheme))
    }

    /// Delete every object under a relative prefix
    ///
    /// This is the overwrite primitive: each dataset prefix is cleared
    /// before its new contents are written. Returns the number of objects
    /// removed; a prefix with no objects is fine.
    pub async fn delete_prefix(&self, rel_prefix: &str) -> Result<usize> {
        let prefix = self.resolve(rel_prefix);
        let paths: Vec<ObjectPath> = self
            .store
            .list(Some(&prefix))
            .map_ok(|meta| meta.location)
            .try_collect()
            .await?;

        let count = paths.len();
        for path in paths {
            self.store
                .delete(&path)
                .await
                .map_err(|e| Error::storage(format!("Failed to delete {path}: {e}")))?;
        }
        Ok(count)
    }
}
