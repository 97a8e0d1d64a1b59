use crate::error::{Error, Result};
use std::fmt;
use url::Url;

/// Path segment that introduces the share token in a public link
const SHARE_SEGMENT: &str = "s";

/// WebDAV collection exposed for public shares, relative to the instance root
const PUBLIC_WEBDAV_PATH: &str = "public.php/webdav/";

/// Endpoint values derived from a public share URL.
///
/// Built once by [`ResolvedEndpoint::resolve`] and never mutated afterwards;
/// target a different share by resolving a new endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    share_token: String,
    base_url: String,
    webdav_url: Url,
}

impl ResolvedEndpoint {
    /// Resolves a public share URL such as `https://cloud.example.com/s/TOKEN`.
    ///
    /// The token is the segment following the first `s` segment. The base URL
    /// keeps scheme, host, port and the path prefix before the last `/s/`.
    /// Query and fragment are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedShareUrl`] if the URL cannot be parsed, is not
    /// http(s), has no host, or carries no `s/<token>` segments.
    pub fn resolve(share_url: &str) -> Result<Self> {
        let parsed = Url::parse(share_url)
            .map_err(|e| Error::MalformedShareUrl(format!("{share_url}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::MalformedShareUrl(format!(
                "Unsupported scheme '{}' in {share_url}",
                parsed.scheme()
            )));
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| Error::MalformedShareUrl(format!("Missing host in {share_url}")))?;

        let path = parsed.path().trim_end_matches('/');
        let share_token = extract_share_token(path).ok_or_else(|| {
            Error::MalformedShareUrl(format!(
                "Could not extract share token from URL: {share_url}"
            ))
        })?;

        let prefix = path.rfind("/s/").map_or(path, |idx| &path[..idx]);
        let authority = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let base_url = format!("{}://{authority}{prefix}", parsed.scheme());

        let webdav_url = Url::parse(&format!("{base_url}/"))
            .and_then(|base| base.join(PUBLIC_WEBDAV_PATH))
            .map_err(|e| Error::MalformedShareUrl(format!("{share_url}: {e}")))?;

        Ok(Self {
            share_token: share_token.to_string(),
            base_url,
            webdav_url,
        })
    }

    #[must_use]
    pub fn share_token(&self) -> &str {
        &self.share_token
    }

    /// Scheme, host and path prefix of the instance, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// WebDAV collection of the share, always ending in `/`
    #[must_use]
    pub fn webdav_url(&self) -> &Url {
        &self.webdav_url
    }

    /// URL of a single resource inside the share collection.
    ///
    /// `name` is appended as one percent-encoded path segment, so a `/` in it
    /// never creates a subdirectory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRemoteName`] for an empty name, `.` or `..`.
    pub fn resource_url(&self, name: &str) -> Result<Url> {
        if matches!(name, "" | "." | "..") {
            return Err(Error::InvalidRemoteName(name.to_string()));
        }

        let mut url = self.webdav_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::MalformedShareUrl(self.webdav_url.to_string()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (share {})", self.webdav_url, self.share_token)
    }
}

fn extract_share_token(path: &str) -> Option<&str> {
    let mut segments = path.split('/');
    segments.by_ref().find(|segment| *segment == SHARE_SEGMENT)?;
    segments.next().filter(|token| !token.is_empty())
}

/// Basic-Auth credentials for a public share: the token is the username.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// A missing password becomes the empty string.
    #[must_use]
    pub fn new(endpoint: &ResolvedEndpoint, password: Option<String>) -> Self {
        Self {
            username: endpoint.share_token().to_string(),
            password: password.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
