/*
 * Client-side bindings for the backend collaborators: the preview service
 * (thread splitting and counting), the enhance service (AI rewrite), the
 * post service (multi-platform publish), and the profile service (display
 * data). The composer depends on these only at the semantic boundary; the
 * wire format is owned by the backend.
 *
 * Each service is a trait so the runtime can be driven against mocks in
 * tests. The concrete `HttpBackendClient` implements all four over HTTP
 * against a configurable base URL.
 */
use crate::core::models::{
    PlatformId, PostResultSet, PreviewSnapshot, StagedImageFile, UserProfile,
};
use std::io::{self, Read, Write};
use std::time::Duration;

// Base URL override for the backend; the default matches the development
// server.
pub const BACKEND_URL_ENV_VAR: &str = "CROSS_POSTER_API";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub enum BackendError {
    // The request never produced a response (connection refused, timeout).
    Transport(String),
    // The service answered with a failure payload; the message is meant for
    // the user verbatim.
    Service(String),
    Decode(serde_json::Error),
    Io(io::Error),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err)
    }
}

impl From<io::Error> for BackendError {
    fn from(err: io::Error) -> Self {
        BackendError::Io(err)
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Transport(msg) => write!(f, "Request failed: {msg}"),
            BackendError::Service(msg) => write!(f, "{msg}"),
            BackendError::Decode(e) => write!(f, "Malformed service response: {e}"),
            BackendError::Io(e) => write!(f, "Service I/O error: {e}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Decode(e) => Some(e),
            BackendError::Io(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

pub trait PreviewServiceOperations: Send + Sync {
    // Idempotent and side-effect-free; returns results for exactly the
    // requested platforms.
    fn fetch_preview(&self, text: &str, platforms: &[PlatformId]) -> Result<PreviewSnapshot>;
}

pub trait EnhanceServiceOperations: Send + Sync {
    fn enhance(&self, text: &str) -> Result<String>;
}

pub trait PostServiceOperations: Send + Sync {
    fn publish(
        &self,
        text: &str,
        platforms: &[PlatformId],
        image: Option<&StagedImageFile>,
    ) -> Result<PostResultSet>;
}

pub trait ProfileServiceOperations: Send + Sync {
    fn fetch_profile(&self) -> Result<UserProfile>;
}

pub struct HttpBackendClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackendClient {
    pub fn new(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        HttpBackendClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    // Reads the base URL from the environment, falling back to the
    // development default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BACKEND_URL_ENV_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /*
     * Maps a `ureq` error to the backend taxonomy. Failure responses that
     * carry a JSON `error` field become `Service` errors with that message;
     * everything else is a transport problem.
     */
    fn classify_error(err: ureq::Error) -> BackendError {
        match err {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_json::<serde_json::Value>()
                    .ok()
                    .and_then(|body| {
                        body.get("error")
                            .and_then(|e| e.as_str())
                            .map(|s| s.to_string())
                    })
                    .unwrap_or_else(|| format!("Service returned HTTP {code}"));
                BackendError::Service(message)
            }
            ureq::Error::Transport(transport) => BackendError::Transport(transport.to_string()),
        }
    }
}

impl PreviewServiceOperations for HttpBackendClient {
    fn fetch_preview(&self, text: &str, platforms: &[PlatformId]) -> Result<PreviewSnapshot> {
        let wire_platforms: Vec<&str> = platforms.iter().map(|p| p.wire_name()).collect();
        log::trace!(
            "HttpBackendClient: Requesting preview for {} platform(s).",
            wire_platforms.len()
        );
        let response = self
            .agent
            .post(&self.endpoint("/api/preview"))
            .send_json(serde_json::json!({
                "text": text,
                "platforms": wire_platforms,
            }))
            .map_err(Self::classify_error)?;
        let snapshot: PreviewSnapshot = response.into_json()?;
        Ok(snapshot)
    }
}

impl EnhanceServiceOperations for HttpBackendClient {
    fn enhance(&self, text: &str) -> Result<String> {
        #[derive(serde::Deserialize)]
        struct EnhanceResponse {
            text: String,
        }

        log::trace!("HttpBackendClient: Requesting enhancement.");
        let response = self
            .agent
            .post(&self.endpoint("/api/enhance"))
            .send_json(serde_json::json!({ "text": text }))
            .map_err(Self::classify_error)?;
        let body: EnhanceResponse = response.into_json()?;
        Ok(body.text)
    }
}

impl PostServiceOperations for HttpBackendClient {
    fn publish(
        &self,
        text: &str,
        platforms: &[PlatformId],
        image: Option<&StagedImageFile>,
    ) -> Result<PostResultSet> {
        let boundary = multipart_boundary();
        let body = encode_multipart_body(&boundary, text, platforms, image)?;
        log::trace!(
            "HttpBackendClient: Publishing to {} platform(s) ({} body bytes).",
            platforms.len(),
            body.len()
        );
        let response = self
            .agent
            .post(&self.endpoint("/api/post"))
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .send_bytes(&body)
            .map_err(Self::classify_error)?;
        let results: PostResultSet = response.into_json()?;
        Ok(results)
    }
}

impl ProfileServiceOperations for HttpBackendClient {
    fn fetch_profile(&self) -> Result<UserProfile> {
        log::trace!("HttpBackendClient: Fetching user profile.");
        let response = self
            .agent
            .get(&self.endpoint("/api/profile"))
            .call()
            .map_err(Self::classify_error)?;
        let profile: UserProfile = response.into_json()?;
        Ok(profile)
    }
}

fn multipart_boundary() -> String {
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("----cross-poster-{stamp:x}")
}

/*
 * Encodes the submission as `multipart/form-data`: a `text` field, one
 * `platforms` field per platform in submission order, and the optional
 * `image` file part.
 */
fn encode_multipart_body(
    boundary: &str,
    text: &str,
    platforms: &[PlatformId],
    image: Option<&StagedImageFile>,
) -> io::Result<Vec<u8>> {
    let mut body = Vec::new();

    write!(body, "--{boundary}\r\n")?;
    write!(body, "Content-Disposition: form-data; name=\"text\"\r\n\r\n")?;
    write!(body, "{text}\r\n")?;

    for platform in platforms {
        write!(body, "--{boundary}\r\n")?;
        write!(
            body,
            "Content-Disposition: form-data; name=\"platforms\"\r\n\r\n"
        )?;
        write!(body, "{}\r\n", platform.wire_name())?;
    }

    if let Some(file) = image {
        write!(body, "--{boundary}\r\n")?;
        write!(
            body,
            "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
            file.file_name
        )?;
        write!(body, "Content-Type: {}\r\n\r\n", file.media_type)?;
        body.write_all(&file.bytes)?;
        write!(body, "\r\n")?;
    }

    write!(body, "--{boundary}--\r\n")?;
    Ok(body)
}
