use crate::error::Error;
use log::{debug, error, info, warn};
use std::path::Path;
use url::Url;

/// Things a [`ShareClient`](crate::ShareClient) reports while it works
#[derive(Debug)]
pub enum ShareEvent<'a> {
    ClientCreated {
        share_token: &'a str,
        webdav_url: &'a Url,
    },
    UploadStarted {
        local_path: &'a Path,
        target: &'a str,
        url: &'a Url,
    },
    UploadSucceeded {
        target: &'a str,
    },
    UploadRejected {
        target: &'a str,
        status: u16,
        body: &'a str,
    },
    UploadFailed {
        target: &'a str,
        error: &'a Error,
    },
    ConnectionTestStarted {
        url: &'a Url,
    },
    ConnectionSucceeded,
    ConnectionRejected {
        status: u16,
        reason: &'a str,
    },
    ConnectionFailed {
        error: &'a Error,
    },
}

/// Receives client events; injected per client instead of a global logger.
pub trait ShareObserver: Send + Sync {
    fn on_event(&self, event: &ShareEvent<'_>);
}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ShareObserver for LogObserver {
    fn on_event(&self, event: &ShareEvent<'_>) {
        match event {
            ShareEvent::ClientCreated {
                share_token,
                webdav_url,
            } => {
                debug!("Initialized uploader for share: {share_token}");
                debug!("WebDAV URL: {webdav_url}");
            }
            ShareEvent::UploadStarted {
                local_path,
                target,
                url,
            } => {
                info!("Uploading {} to {target}", local_path.display());
                debug!("Upload URL: {url}");
            }
            ShareEvent::UploadSucceeded { target } => info!("Successfully uploaded {target}"),
            ShareEvent::UploadRejected {
                target,
                status,
                body,
            } => error!("Upload of {target} failed with status {status}: {body}"),
            ShareEvent::UploadFailed { target, error } => {
                error!("Upload of {target} failed: {error}");
            }
            ShareEvent::ConnectionTestStarted { url } => debug!("Testing connection to {url}"),
            ShareEvent::ConnectionSucceeded => info!("Connection test successful"),
            ShareEvent::ConnectionRejected { status, reason } => {
                warn!("Connection test failed with status {status} {reason}");
            }
            ShareEvent::ConnectionFailed { error } => error!("Connection test failed: {error}"),
        }
    }
}
