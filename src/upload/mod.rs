pub mod progress;

use crate::api::transport::RequestBody;
use crate::error::{Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

/// Upper bound on the size of a chunk read from disk while streaming
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Receives the cumulative number of bytes read after each chunk
pub type ProgressSink = Arc<dyn Fn(u64) + Send + Sync>;

/// Options for uploading a file
#[derive(Clone, Default)]
pub struct UploadOptions {
    /// Name on the share; defaults to the local file name.
    pub remote_name: Option<String>,
    /// When set, the file is streamed in chunks and progress is reported.
    pub progress: Option<ProgressSink>,
}

impl UploadOptions {
    #[must_use]
    pub fn with_remote_name(mut self, remote_name: impl Into<String>) -> Self {
        self.remote_name = Some(remote_name.into());
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressSink) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadOptions")
            .field("remote_name", &self.remote_name)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Local file and the name it will get on the share
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub local_path: PathBuf,
    pub remote_name: String,
}

impl UploadTarget {
    /// # Errors
    ///
    /// Returns [`Error::InvalidRemoteName`] if no name is given and the local
    /// path has no UTF-8 file name.
    pub fn new(local_path: &Path, remote_name: Option<String>) -> Result<Self> {
        let remote_name = match remote_name {
            Some(name) => name,
            None => local_path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidRemoteName(local_path.display().to_string()))?,
        };

        Ok(Self {
            local_path: local_path.to_path_buf(),
            remote_name,
        })
    }
}

fn not_found(path: &Path, source: Option<std::io::Error>) -> Error {
    Error::LocalFileNotFound {
        path: path.to_path_buf(),
        source,
    }
}

/// Size of the regular file at `path`.
///
/// # Errors
///
/// Returns [`Error::LocalFileNotFound`] if the path is missing, unreadable
/// or not a regular file.
pub async fn local_file_size(path: &Path) -> Result<u64> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| not_found(path, Some(e)))?;

    if !metadata.is_file() {
        return Err(not_found(path, None));
    }

    Ok(metadata.len())
}

/// Build the request body for `path`.
///
/// Without a progress sink the whole file is read at once. With one, the
/// file is streamed in chunks of at most [`CHUNK_SIZE`] bytes and the sink is
/// called with the running total after each chunk. Both produce the same bytes.
///
/// # Errors
///
/// Returns [`Error::LocalFileNotFound`] if the file cannot be opened or read.
pub async fn prepare_body(
    path: &Path,
    file_size: u64,
    progress: Option<ProgressSink>,
) -> Result<RequestBody> {
    let Some(progress) = progress else {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| not_found(path, Some(e)))?;
        return Ok(RequestBody::Bytes(Bytes::from(data)));
    };

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| not_found(path, Some(e)))?;

    let mut uploaded: u64 = 0;
    let stream = ReaderStream::with_capacity(file, CHUNK_SIZE).inspect_ok(move |chunk| {
        uploaded += chunk.len() as u64;
        progress(uploaded);
    });

    Ok(RequestBody::Stream {
        stream: Box::pin(stream),
        len: file_size,
    })
}
