//! HTTP client for the cat gateway.
//!
//! One request per call: no retries, no client-side timeouts beyond the
//! `reqwest` defaults.

use catdb_core::cat::{Cat, FieldError, NewCat};
use catdb_core::types::CatId;
use catdb_core::view_model::GatewayRequest;
use serde::de::DeserializeOwned;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request failed (connection refused, DNS, body decode, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    #[error("Gateway returned HTTP {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Per-field failures for validation errors, otherwise empty.
        details: Vec<FieldError>,
    },
}

impl ClientError {
    /// HTTP status for gateway errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Error body produced by the gateway.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Vec<FieldError>,
}

#[derive(Deserialize)]
struct CreatedBody {
    cat: Cat,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedBody {
    updated_cat: Cat,
}

/// Result of [`CatClient::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse {
    Listed(Vec<Cat>),
    Created(Cat),
    Updated(Cat),
    Deleted,
}

// ---------------------------------------------------------------------------
// CatClient
// ---------------------------------------------------------------------------

/// Talks to the four gateway endpoints.
#[derive(Debug, Clone)]
pub struct CatClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatClient {
    /// `base_url` is the gateway root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET /cats
    pub async fn list(&self) -> ClientResult<Vec<Cat>> {
        let response = self.http.get(self.url("/cats")).send().await?;
        decode(response).await
    }

    /// POST /add-cat
    pub async fn create(&self, cat: &NewCat) -> ClientResult<Cat> {
        let response = self
            .http
            .post(self.url("/add-cat"))
            .json(cat)
            .send()
            .await?;
        let body: CreatedBody = decode(response).await?;
        Ok(body.cat)
    }

    /// PUT /update-cat/{id}
    pub async fn update(&self, id: CatId, cat: &NewCat) -> ClientResult<Cat> {
        let response = self
            .http
            .put(self.url(&format!("/update-cat/{id}")))
            .json(cat)
            .send()
            .await?;
        let body: UpdatedBody = decode(response).await?;
        Ok(body.updated_cat)
    }

    /// DELETE /delete-cat/{id}
    pub async fn delete(&self, id: CatId) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/delete-cat/{id}")))
            .send()
            .await?;
        let _: serde_json::Value = decode(response).await?;
        Ok(())
    }

    /// Dispatch a request built by the view-model.
    pub async fn execute(&self, request: GatewayRequest) -> ClientResult<GatewayResponse> {
        match request {
            GatewayRequest::List => self.list().await.map(GatewayResponse::Listed),
            GatewayRequest::Create(cat) => self.create(&cat).await.map(GatewayResponse::Created),
            GatewayRequest::Update(id, cat) => {
                self.update(id, &cat).await.map(GatewayResponse::Updated)
            }
            GatewayRequest::Delete(id) => self.delete(id).await.map(|()| GatewayResponse::Deleted),
        }
    }
}

/// Decode a 2xx body as `T`, or turn the gateway's error body into
/// [`ClientError::Api`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let (message, details) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.error, body.details),
        Err(_) => (text, Vec::new()),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        details,
    })
}
