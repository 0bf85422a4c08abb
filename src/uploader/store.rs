use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    Client,
    error::{DisplayErrorContext, SdkError},
    primitives::ByteStream,
};
use std::{env, path::Path};

use crate::errors::{Result, ShipshapeError};

/// Default retention settings of a bucket's object lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRetention {
    pub mode: String,
    pub days: i32,
}

impl LockRetention {
    /// Desired retention as supplied through the environment
    /// (`OBJECT_LOCK_DEFAULT_MODE`, `OBJECT_LOCK_DEFAULT_DAYS`).
    pub fn from_env() -> Result<Self> {
        let mode = env::var("OBJECT_LOCK_DEFAULT_MODE")
            .map_err(|_| ShipshapeError::Config("OBJECT_LOCK_DEFAULT_MODE is not set".into()))?;
        let days = env::var("OBJECT_LOCK_DEFAULT_DAYS")
            .map_err(|_| ShipshapeError::Config("OBJECT_LOCK_DEFAULT_DAYS is not set".into()))?
            .parse()
            .map_err(|e| {
                ShipshapeError::Config(format!("OBJECT_LOCK_DEFAULT_DAYS is not a number: {e}"))
            })?;

        Ok(Self { mode, days })
    }
}

/// Seam between the upload pipeline and the remote bucket. Production uses
/// [`S3Store`]; tests substitute an in-memory implementation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Transmit a local file's content under `key`.
    async fn put_object(&self, local: &Path, key: &str) -> Result<()>;

    /// Digest of the stored object, normalized to unquoted lowercase hex.
    /// `None` when no object exists under `key`; genuine transport or auth
    /// failures surface as errors.
    async fn object_digest(&self, key: &str) -> Result<Option<String>>;

    async fn delete_object(&self, key: &str) -> Result<()>;

    /// Current default retention of the bucket's object lock, if configured.
    async fn lock_retention(&self) -> Result<Option<LockRetention>>;
}

/// S3-backed store over one named bucket. Region and credentials come from
/// the ambient AWS configuration (environment, profile, IAM role).
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub async fn connect(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&config),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, local: &Path, key: &str) -> Result<()> {
        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| ShipshapeError::Store(format!("read {}: {e}", local.display())))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| store_error("put object", e))?;

        Ok(())
    }

    async fn object_digest(&self, key: &str) -> Result<Option<String>> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(out) => Ok(out.e_tag().map(normalize_etag)),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_not_found() => Ok(None),
            Err(e) => Err(store_error("head object", e)),
        }
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| store_error("delete object", e))?;

        Ok(())
    }

    async fn lock_retention(&self) -> Result<Option<LockRetention>> {
        let out = self
            .client
            .get_object_lock_configuration()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| store_error("get object lock configuration", e))?;

        let retention = out
            .object_lock_configuration()
            .and_then(|config| config.rule())
            .and_then(|rule| rule.default_retention());

        Ok(retention.map(|r| LockRetention {
            mode: r.mode().map(|m| m.as_str().to_string()).unwrap_or_default(),
            days: r.days().unwrap_or(0),
        }))
    }
}

/// S3 wraps the ETag in quotes; strip them and lowercase so digests compare
/// byte-for-byte against local hex.
pub fn normalize_etag(etag: &str) -> String {
    etag.trim_matches('"').to_ascii_lowercase()
}

fn store_error(op: &str, err: impl std::error::Error + Send + Sync + 'static) -> ShipshapeError {
    ShipshapeError::Store(format!("{op}: {}", DisplayErrorContext(&err)))
}
