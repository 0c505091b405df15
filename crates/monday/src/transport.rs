//! GraphQL transport
//!
//! A [`Transport`] sends one query or mutation document with its variables and hands
//! back the `data` member of the response. The reqwest-backed [`HttpTransport`] comes
//! in two independently configured flavours: plain JSON for ordinary calls and
//! multipart for file uploads. The client keeps one instance of each.

use std::future::Future;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::ApiToken;
use crate::error::{Error, Result};

/// Form field carrying the uploaded file
pub const FILE_FIELD: &str = "variables[file]";

/// A file sent along with a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A query or mutation with its bound variables
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlRequest {
    /// Short name used for logging
    pub operation: &'static str,
    pub query: &'static str,
    pub variables: Map<String, Value>,
    pub file: Option<FileUpload>,
}

impl GraphqlRequest {
    pub fn new(operation: &'static str, query: &'static str) -> Self {
        Self {
            operation,
            query,
            variables: Map::new(),
            file: None,
        }
    }

    /// Binds a variable.
    pub fn var(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    /// Attaches a file; only the multipart transport can send it.
    pub fn file(mut self, file: FileUpload) -> Self {
        self.file = Some(file);
        self
    }
}

/// Sends GraphQL requests
pub trait Transport: Send + Sync {
    /// Runs `request` and returns the response's `data` member.
    fn execute(&self, request: GraphqlRequest) -> impl Future<Output = Result<Value>> + Send;
}

/// Request body encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// reqwest-backed transport bound to one endpoint and one encoding
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
    encoding: Encoding,
}

impl HttpTransport {
    /// Transport for ordinary JSON calls.
    pub fn json(url: impl Into<String>, token: &ApiToken) -> Result<Self> {
        let mut headers = auth_headers(token)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self::build(url.into(), headers, Encoding::Json)
    }

    /// Transport for file uploads. No Content-Type default: multipart sets its own
    /// boundary.
    pub fn multipart(url: impl Into<String>, token: &ApiToken) -> Result<Self> {
        Self::build(url.into(), auth_headers(token)?, Encoding::Multipart)
    }

    fn build(url: String, headers: HeaderMap, encoding: Encoding) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url,
            encoding,
        })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn multipart_form(request: GraphqlRequest) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new()
            .text("query", request.query)
            .text("variables", serde_json::to_string(&request.variables)?);

        if let Some(file) = request.file {
            let content_type = upload_content_type(&file.file_name);
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(content_type)
                .map_err(|e| Error::Transport(format!("Invalid MIME type: {e}")))?;
            form = form.part(FILE_FIELD, part);
        }

        Ok(form)
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value> {
        log::debug!("POST {} ({})", self.url, request.operation);

        let builder = self.http.post(&self.url);
        let builder = match self.encoding {
            Encoding::Json => {
                if request.file.is_some() {
                    return Err(Error::Transport(format!(
                        "{} uploads a file and needs the multipart transport",
                        request.operation
                    )));
                }
                builder.json(&serde_json::json!({
                    "query": request.query,
                    "variables": request.variables,
                }))
            }
            Encoding::Multipart => builder.multipart(Self::multipart_form(request)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to send request to monday: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!("monday API error [{status}]: {body}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response body: {e}")))?;

        parse_response(&body)
    }
}

fn auth_headers(token: &ApiToken) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(token.expose())
            .map_err(|e| Error::Config(format!("Invalid header value: {e}")))?,
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(headers)
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Unwraps a GraphQL response body into its `data` member.
///
/// GraphQL `errors` arrays and monday's top-level `error_message` become
/// [`Error::RemoteOperation`].
pub fn parse_response(body: &str) -> Result<Value> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| Error::UnexpectedResponse(format!("Invalid JSON response: {e}")))?;

    if !envelope.errors.is_empty() {
        return Err(Error::RemoteOperation(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    if let Some(message) = envelope.error_message {
        let message = match envelope.error_code {
            Some(code) => format!("{code}: {message}"),
            None => message,
        };
        return Err(Error::RemoteOperation(vec![message]));
    }

    match envelope.data {
        Some(Value::Null) | None => Err(Error::UnexpectedResponse(
            "response has no data".to_string(),
        )),
        Some(data) => Ok(data),
    }
}

/// Content types for the uploads monday previews; anything else is sent as bytes.
const UPLOAD_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("json", "application/json"),
    ("zip", "application/zip"),
    ("mp4", "video/mp4"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
];

fn upload_content_type(file_name: &str) -> &'static str {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            UPLOAD_TYPES
                .iter()
                .find(|(known, _)| ext.eq_ignore_ascii_case(known))
        })
        .map_or("application/octet-stream", |(_, content_type)| *content_type)
}
