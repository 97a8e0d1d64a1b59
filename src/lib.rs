//! Upload files to Nextcloud public shares over WebDAV

pub mod config;
pub mod error;
pub mod file_config;
pub mod observer;
pub mod share;

pub mod api;
pub mod upload;

pub use config::Config;
pub use error::{Error, Result};

// Re-export commonly used types
pub use api::{HttpTransport, ShareClient, Transport};
pub use observer::{LogObserver, ShareEvent, ShareObserver};
pub use share::{Credentials, ResolvedEndpoint};
pub use upload::{ProgressSink, UploadOptions};
