use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

/// Destination bucket for a screened document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Accepted,
    Rejected,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::Accepted, Bucket::Rejected];

    pub fn for_verdict(passed: bool) -> Self {
        if passed {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            Bucket::Accepted => "Accepted",
            Bucket::Rejected => "Rejected",
        }
    }
}

/// Copies source documents into `Accepted/` or `Rejected/` under a base directory.
///
/// Sources are never moved or modified. A destination with the same file name
/// is overwritten.
#[derive(Debug)]
pub struct ClassificationRouter {
    base_dir: PathBuf,
    buckets_ready: OnceLock<()>,
}

impl ClassificationRouter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            buckets_ready: OnceLock::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn bucket_dir(&self, bucket: Bucket) -> PathBuf {
        self.base_dir.join(bucket.dir_name())
    }

    /// Creates both bucket directories. Repeat calls after a success are no-ops.
    pub fn ensure_buckets(&self) -> Result<(), RoutingError> {
        if self.buckets_ready.get().is_some() {
            return Ok(());
        }

        for bucket in Bucket::ALL {
            self.create_bucket(bucket)?;
        }

        let _ = self.buckets_ready.set(());
        debug!(base_dir = %self.base_dir.display(), "output buckets ready");
        Ok(())
    }

    /// Copies `source` into the bucket for `passed`, returning the destination path.
    pub fn route(&self, source: &Path, passed: bool) -> Result<PathBuf, RoutingError> {
        let bucket = Bucket::for_verdict(passed);
        let file_name = source
            .file_name()
            .ok_or_else(|| RoutingError::MissingFileName {
                source_path: source.to_path_buf(),
            })?;

        let dir = self.create_bucket(bucket)?;
        let destination = dir.join(file_name);

        fs::copy(source, &destination).map_err(|err| RoutingError::Copy {
            source_path: source.to_path_buf(),
            destination: destination.clone(),
            source: err,
        })?;

        debug!(
            source = %source.display(),
            destination = %destination.display(),
            bucket = bucket.dir_name(),
            "document routed"
        );
        Ok(destination)
    }

    fn create_bucket(&self, bucket: Bucket) -> Result<PathBuf, RoutingError> {
        let dir = self.bucket_dir(bucket);
        fs::create_dir_all(&dir).map_err(|source| RoutingError::CreateBucket {
            dir: dir.clone(),
            source,
        })?;
        Ok(dir)
    }
}

/// Raised when a document cannot be filed into its bucket.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("could not create output directory {dir}: {source}")]
    CreateBucket {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not copy {source_path} to {destination}: {source}")]
    Copy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{source_path} has no file name to copy under")]
    MissingFileName { source_path: PathBuf },
}
