use std::{path::Path, sync::Arc};
use tracing::{error, info, warn};

use crate::{
    digest::md5_hex,
    errors::{Result, ShipshapeError},
    retry::{RetryPolicy, retry_with_backoff},
    scanner::Scanner,
    store::{LockRetention, ObjectStore},
};

/// Uploads a directory tree to an object store, verifying every object's
/// digest after transfer. Holds no mutable state across calls beyond the
/// store handle.
pub struct Uploader {
    store: Arc<dyn ObjectStore>,
    retry: RetryPolicy,
}

impl Uploader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Upload one file and confirm the stored digest matches the local one.
    ///
    /// On mismatch the just-uploaded object is deleted so the store never
    /// durably holds a corrupt object under the key, then the integrity
    /// failure is raised for the retry wrapper to act on.
    pub async fn upload_one(&self, local: &Path, key: &str) -> Result<()> {
        let local_digest = md5_hex(local)
            .inspect_err(|e| error!(path = %local.display(), error = %e, "digest failed"))?;

        self.store
            .put_object(local, key)
            .await
            .inspect_err(|e| error!(key, error = %e, "put failed"))?;

        let remote_digest = self
            .store
            .object_digest(key)
            .await
            .inspect_err(|e| error!(key, error = %e, "digest lookup failed"))?;

        if remote_digest.as_deref() == Some(local_digest.as_str()) {
            info!(key, "upload verified");
            return Ok(());
        }

        let remote = remote_digest.unwrap_or_else(|| "absent".to_string());
        warn!(key, local = %local_digest, remote = %remote, "digest mismatch, removing corrupt object");

        // Secondary failure here is logged but must not mask the mismatch.
        if let Err(e) = self.store.delete_object(key).await {
            error!(key, error = %e, "failed to delete corrupt object");
        }

        Err(ShipshapeError::Integrity {
            key: key.to_string(),
            local: local_digest,
            remote,
        })
    }

    /// Upload every file under `root`, keyed by its root-relative path, as
    /// one batch wrapped in a single retry policy. A failure anywhere
    /// restarts the whole batch from the first file; already-confirmed
    /// objects are simply re-uploaded.
    pub async fn upload_directory(&self, root: &Path) -> Result<()> {
        retry_with_backoff(&self.retry, || self.upload_batch(root)).await
    }

    async fn upload_batch(&self, root: &Path) -> Result<()> {
        let files = Scanner::new(root)
            .files()
            .inspect_err(|e| error!(root = %root.display(), error = %e, "enumeration failed"))?;

        info!(root = %root.display(), count = files.len(), "uploading directory");

        for file in files {
            let key = object_key(root, &file)?;
            self.upload_one(&file, &key).await?;
        }

        Ok(())
    }

    /// Whether the bucket's object-lock default retention matches `desired`.
    /// Mismatch, absent configuration, and lookup failure all collapse to
    /// `false`; each is logged with its own cause.
    pub async fn validate_object_lock(&self, desired: &LockRetention) -> bool {
        match self.store.lock_retention().await {
            Ok(Some(current)) if current == *desired => true,
            Ok(current) => {
                error!(
                    ?current,
                    ?desired,
                    "object lock settings do not match the desired configuration"
                );
                false
            }
            Err(e) => {
                error!(error = %e, "could not read object lock configuration");
                false
            }
        }
    }
}

/// Remote key for a file: its path relative to the upload root, joined with
/// forward slashes regardless of platform.
pub fn object_key(root: &Path, file: &Path) -> Result<String> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| ShipshapeError::InvalidPath(file.to_path_buf()))?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
