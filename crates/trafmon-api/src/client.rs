// Backend API HTTP client
//
// Wraps `reqwest::Client` with URL construction and JSON decoding for the
// traffic monitor backend. Every endpoint is a thin inherent method; the
// transport mechanics live in the private request helpers below.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{
    ActionReply, ApiAlert, ApiInterface, ApiPacket, ApiTrafficSample, ApiTrafficStats, ApiTrendPoint, ApiUser,
};
use crate::transport::TransportConfig;

/// Raw HTTP client for the traffic monitor backend.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally, so
/// background fetch tasks each take their own handle.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from a backend root URL (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Read endpoints ───────────────────────────────────────────────

    /// `GET /api/traffic`
    pub async fn list_traffic(&self) -> Result<Vec<ApiTrafficSample>, Error> {
        self.get(self.api_url("traffic")?).await
    }

    /// `GET /api/interfaces`
    pub async fn list_interfaces(&self) -> Result<Vec<ApiInterface>, Error> {
        self.get(self.api_url("interfaces")?).await
    }

    /// `GET /api/alerts`
    pub async fn list_alerts(&self) -> Result<Vec<ApiAlert>, Error> {
        self.get(self.api_url("alerts")?).await
    }

    /// `GET /api/packets`
    pub async fn list_packets(&self) -> Result<Vec<ApiPacket>, Error> {
        self.get(self.api_url("packets")?).await
    }

    /// `GET /api/users`
    pub async fn list_users(&self) -> Result<Vec<ApiUser>, Error> {
        self.get(self.api_url("users")?).await
    }

    /// `GET /api/traffic_stats`
    pub async fn get_traffic_stats(&self) -> Result<ApiTrafficStats, Error> {
        self.get(self.api_url("traffic_stats")?).await
    }

    /// `GET /api/traffic_trend`
    pub async fn get_traffic_trend(&self) -> Result<Vec<ApiTrendPoint>, Error> {
        self.get(self.api_url("traffic_trend")?).await
    }

    // ── Mutating endpoints ───────────────────────────────────────────
    //
    // These resolve to `Ok` for any JSON reply, error statuses included;
    // only transport failures and non-JSON bodies are errors.

    /// `POST /api/interfaces/{id}/toggle`
    pub async fn toggle_interface(&self, id: i64) -> Result<ActionReply, Error> {
        self.post(self.api_url(&format!("interfaces/{id}/toggle"))?)
            .await
    }

    /// `POST /api/alerts/{id}/resolve`
    pub async fn resolve_alert(&self, id: i64) -> Result<ActionReply, Error> {
        self.post(self.api_url(&format!("alerts/{id}/resolve"))?)
            .await
    }

    /// `DELETE /api/users/{id}`
    pub async fn delete_user(&self, id: i64) -> Result<ActionReply, Error> {
        self.delete(self.api_url(&format!("users/{id}"))?).await
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/api/{path}`, tolerating a trailing slash on the base.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::parse_json(resp).await
    }

    async fn post(&self, url: Url) -> Result<ActionReply, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).send().await?;
        Self::parse_reply(resp).await
    }

    async fn delete(&self, url: Url) -> Result<ActionReply, Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        Self::parse_reply(resp).await
    }

    /// Decode the body as JSON.
    ///
    /// The body is read as text first so a decode failure can carry a
    /// preview of what the backend actually sent (often an HTML error page).
    /// A body that does not decode under an error status is reported as
    /// [`Error::Http`] instead.
    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| decode_error(status, e, body))
    }

    /// Keep the status next to any JSON body.
    async fn parse_reply(resp: reqwest::Response) -> Result<ActionReply, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        match serde_json::from_str(&body) {
            Ok(json) => {
                if !status.is_success() {
                    debug!(status = status.as_u16(), "action answered with an error status");
                }
                Ok(ActionReply {
                    status: status.as_u16(),
                    body: json,
                })
            }
            Err(e) => Err(decode_error(status, e, body)),
        }
    }
}

fn decode_error(status: reqwest::StatusCode, err: serde_json::Error, body: String) -> Error {
    if status.is_success() {
        Error::Deserialization {
            message: format!("{err} (body preview: {:?})", preview(&body)),
            body,
        }
    } else {
        Error::Http {
            status: status.as_u16(),
            message: preview(&body).to_owned(),
        }
    }
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
