use crate::api::transport::{HttpTransport, Transport};
use crate::error::Result;
use crate::observer::{LogObserver, ShareEvent, ShareObserver};
use crate::share::{Credentials, ResolvedEndpoint};
use crate::upload::{self, UploadOptions, UploadTarget};
use std::path::Path;
use std::sync::Arc;

/// Status codes accepted for a PUT that created or replaced a resource
const UPLOAD_SUCCESS: [u16; 3] = [200, 201, 204];

/// Status codes accepted for a PROPFIND on the share collection
const PROPFIND_SUCCESS: [u16; 2] = [200, 207];

/// Client for a single public share.
///
/// Endpoint and credentials are fixed at construction; every call is an
/// independent request, so a client can be reused for sequential calls.
pub struct ShareClient<T = HttpTransport> {
    endpoint: ResolvedEndpoint,
    credentials: Credentials,
    transport: T,
    observer: Arc<dyn ShareObserver>,
}

impl ShareClient<HttpTransport> {
    #[must_use]
    pub fn new(endpoint: ResolvedEndpoint, password: Option<String>) -> Self {
        Self::with_transport(endpoint, password, HttpTransport::new())
    }
}

impl<T: Transport> ShareClient<T> {
    #[must_use]
    pub fn with_transport(endpoint: ResolvedEndpoint, password: Option<String>, transport: T) -> Self {
        let client = Self {
            credentials: Credentials::new(&endpoint, password),
            endpoint,
            transport,
            observer: Arc::new(LogObserver),
        };
        client.announce();
        client
    }

    /// Replace the default [`LogObserver`]
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ShareObserver>) -> Self {
        self.observer = observer;
        self.announce();
        self
    }

    fn announce(&self) {
        self.observer.on_event(&ShareEvent::ClientCreated {
            share_token: self.endpoint.share_token(),
            webdav_url: self.endpoint.webdav_url(),
        });
    }

    #[must_use]
    pub fn endpoint(&self) -> &ResolvedEndpoint {
        &self.endpoint
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Upload a local file into the share with a single PUT.
    ///
    /// Returns `Ok(true)` on 200, 201 or 204 and `Ok(false)` on any other
    /// status. The local file and remote name are checked before any request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The local file is missing, unreadable or not a regular file
    /// - The remote name is empty, `.` or `..`
    /// - The server cannot be reached (`TransportError`)
    pub async fn upload(&self, local_path: impl AsRef<Path>, options: UploadOptions) -> Result<bool> {
        let local_path = local_path.as_ref();
        let file_size = upload::local_file_size(local_path).await?;
        let target = UploadTarget::new(local_path, options.remote_name)?;
        let url = self.endpoint.resource_url(&target.remote_name)?;

        self.observer.on_event(&ShareEvent::UploadStarted {
            local_path,
            target: &target.remote_name,
            url: &url,
        });

        let body = upload::prepare_body(local_path, file_size, options.progress).await?;

        match self.transport.put(&url, &self.credentials, body).await {
            Ok(response) if UPLOAD_SUCCESS.contains(&response.status) => {
                self.observer.on_event(&ShareEvent::UploadSucceeded {
                    target: &target.remote_name,
                });
                Ok(true)
            }
            Ok(response) => {
                self.observer.on_event(&ShareEvent::UploadRejected {
                    target: &target.remote_name,
                    status: response.status,
                    body: &response.body,
                });
                Ok(false)
            }
            Err(error) => {
                self.observer.on_event(&ShareEvent::UploadFailed {
                    target: &target.remote_name,
                    error: &error,
                });
                Err(error)
            }
        }
    }

    /// Check that the share answers a PROPFIND with 200 or 207.
    ///
    /// Never fails: rejected requests and transport errors both yield `false`.
    pub async fn test_connection(&self) -> bool {
        let url = self.endpoint.webdav_url();
        self.observer
            .on_event(&ShareEvent::ConnectionTestStarted { url });

        match self.transport.propfind(url, &self.credentials).await {
            Ok(response) if PROPFIND_SUCCESS.contains(&response.status) => {
                self.observer.on_event(&ShareEvent::ConnectionSucceeded);
                true
            }
            Ok(response) => {
                self.observer.on_event(&ShareEvent::ConnectionRejected {
                    status: response.status,
                    reason: &response.reason,
                });
                false
            }
            Err(error) => {
                self.observer
                    .on_event(&ShareEvent::ConnectionFailed { error: &error });
                false
            }
        }
    }
}
