// API client module: a small blocking HTTP client that talks to the
// GoFile hosting API. Uploading is a two-step protocol: ask the
// directory endpoint which upload server to use, then POST the file to
// that server as multipart/form-data. Response interpretation lives in
// standalone functions so it can be tested without a socket.

use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::UploadError;

/// Directory endpoint queried for an upload-server assignment.
const DEFAULT_API_URL: &str = "https://api.gofile.io";

/// Domain under which the assigned upload servers live.
const UPLOAD_DOMAIN: &str = "gofile.io";

/// Sent verbatim on every request; the remote service may inspect it.
const CLIENT_USER_AGENT: &str = "GoFile-CPP-Client/1.0";

/// Everything needed for one upload, assembled once and then treated
/// as immutable. `token` and `password` are forwarded to the service
/// as-is; empty values are dropped rather than sent as empty fields.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_path: PathBuf,
    pub file_name: String,
    pub content: Vec<u8>,
    pub mime_type: String,
    pub token: Option<String>,
    pub password: Option<String>,
}

impl UploadRequest {
    /// Read the file at `path` into memory and pick a mime type:
    /// the caller's override if given, otherwise a guess from the
    /// file extension, otherwise `application/octet-stream`.
    pub fn from_path(
        path: &Path,
        mime_override: Option<String>,
        token: Option<String>,
        password: Option<String>,
    ) -> Result<Self, UploadError> {
        let content = fs::read(path).map_err(|source| UploadError::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = match mime_override.filter(|m| !m.is_empty()) {
            Some(m) => m,
            None => mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };
        Ok(UploadRequest {
            file_path: path.to_path_buf(),
            file_name,
            content,
            mime_type,
            token,
            password,
        })
    }
}

/// Fields of a successful upload response. The service does not
/// promise all of them on every success, so each one defaults to an
/// empty string when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadInfo {
    pub download_page: String,
    pub file_name: String,
    pub md5: String,
    pub direct_link: String,
}

/// Terminal result of an upload: either the link set from an `"ok"`
/// response, or the full response body for diagnostic display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success(UploadInfo),
    Failure { detail: String },
}

/// Blocking client for the two GoFile endpoints. Holds the directory
/// base URL (overridable via `GOFILE_API_URL`, mainly for pointing the
/// tool at a stand-in server) and a reqwest client carrying the fixed
/// User-Agent.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create an ApiClient configured from the environment variable
    /// `GOFILE_API_URL` or fallback to the public API host.
    pub fn from_env() -> Result<Self, UploadError> {
        let base_url =
            std::env::var("GOFILE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let client = Client::builder().user_agent(CLIENT_USER_AGENT).build()?;
        Ok(ApiClient { client, base_url })
    }

    /// Ask the directory endpoint which upload server this transfer
    /// should target. Any failure here is fatal for the whole run; no
    /// upload request is attempted after it.
    pub fn resolve_best_server(&self) -> Result<String, UploadError> {
        let url = format!("{}/getServer", self.base_url);
        let body = self.client.get(&url).send()?.text()?;
        decode_server_response(&body)
    }

    /// Send the file to the assigned server and decode the response
    /// envelope. The whole file content goes out as one request body;
    /// there is no chunking or resume.
    pub fn upload(
        &self,
        request: &UploadRequest,
        server: &str,
    ) -> Result<UploadOutcome, UploadError> {
        let part = multipart::Part::bytes(request.content.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|_| {
                UploadError::Argument(format!("invalid mime type: {}", request.mime_type))
            })?;
        let mut form = multipart::Form::new().part("file", part);
        for (name, value) in extra_form_fields(request) {
            form = form.text(name, value);
        }

        let url = format!("https://{}.{}/uploadFile", server, UPLOAD_DOMAIN);
        let body = self.client.post(&url).multipart(form).send()?.text()?;
        decode_upload_response(&body)
    }
}

/// Optional form fields to append to the upload body. A field is
/// included only when its value is non-empty; empty optionals are
/// omitted entirely instead of being sent as empty strings.
pub fn extra_form_fields(request: &UploadRequest) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    if let Some(password) = request.password.as_deref().filter(|p| !p.is_empty()) {
        fields.push(("password", password.to_string()));
    }
    if let Some(token) = request.token.as_deref().filter(|t| !t.is_empty()) {
        fields.push(("token", token.to_string()));
    }
    fields
}

/// Decode the directory endpoint's reply into a server identifier.
/// Anything other than `status == "ok"` with a non-empty
/// `data.server` is a protocol error.
pub fn decode_server_response(body: &str) -> Result<String, UploadError> {
    let parsed: serde_json::Value = serde_json::from_str(body).map_err(|_| {
        UploadError::Protocol(format!("directory endpoint returned non-JSON body: {body}"))
    })?;
    if parsed["status"] != "ok" {
        return Err(UploadError::Protocol(format!(
            "directory endpoint refused the request: {}",
            pretty(&parsed)
        )));
    }
    match parsed["data"]["server"].as_str() {
        Some(server) if !server.is_empty() => Ok(server.to_string()),
        _ => Err(UploadError::Protocol(format!(
            "directory endpoint response has no server name: {}",
            pretty(&parsed)
        ))),
    }
}

/// Decode the upload endpoint's reply. `status == "ok"` yields a
/// `Success` with missing `data` fields left empty; every other JSON
/// body becomes a `Failure` carrying the full dump. A non-JSON body
/// is a protocol error rather than a `Failure`.
pub fn decode_upload_response(body: &str) -> Result<UploadOutcome, UploadError> {
    let parsed: serde_json::Value = serde_json::from_str(body).map_err(|_| {
        UploadError::Protocol(format!("upload endpoint returned non-JSON body: {body}"))
    })?;
    if parsed["status"] == "ok" {
        let info = serde_json::from_value(parsed["data"].clone()).unwrap_or_default();
        Ok(UploadOutcome::Success(info))
    } else {
        Ok(UploadOutcome::Failure {
            detail: pretty(&parsed),
        })
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
