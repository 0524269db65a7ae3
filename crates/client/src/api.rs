//! REST client for the sketchbook server.
//!
//! [`SketchApi`] is the seam the form and list state machines depend on;
//! [`HttpSketchApi`] implements it with [`reqwest`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sketchbook_core::lookup::LookupKind;
use sketchbook_core::types::DbId;

use crate::error::ClientError;
use crate::models::{Lookup, LookupSet, NewSketch, Sketch, SketchFields, SketchQuery};

/// The server operations used by the client.
#[async_trait]
pub trait SketchApi: Send + Sync {
    async fn list_lookups(&self) -> Result<LookupSet, ClientError>;

    async fn create_lookup(
        &self,
        kind: LookupKind,
        name: &str,
        hex: Option<&str>,
    ) -> Result<Lookup, ClientError>;

    async fn list_sketches(&self, query: &SketchQuery) -> Result<Vec<Sketch>, ClientError>;

    async fn create_sketch(&self, sketch: &NewSketch) -> Result<Sketch, ClientError>;

    async fn update_sketch(&self, id: DbId, fields: &SketchFields) -> Result<Sketch, ClientError>;

    async fn delete_sketch(&self, id: DbId) -> Result<(), ClientError>;
}

/// HTTP client for a single sketchbook server.
pub struct HttpSketchApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct LookupBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hex: Option<&'a str>,
}

impl HttpSketchApi {
    /// Create a client for a server.
    ///
    /// * `base_url` - Server origin, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    // ---- private helpers ----

    /// Return the response unchanged on a success status, otherwise a
    /// [`ClientError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SketchApi for HttpSketchApi {
    async fn list_lookups(&self) -> Result<LookupSet, ClientError> {
        let response = self.client.get(self.url("/lookups")).send().await?;
        Self::parse_response(response).await
    }

    async fn create_lookup(
        &self,
        kind: LookupKind,
        name: &str,
        hex: Option<&str>,
    ) -> Result<Lookup, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/lookups/{}", kind.segment())))
            .json(&LookupBody { name, hex })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_sketches(&self, query: &SketchQuery) -> Result<Vec<Sketch>, ClientError> {
        let response = self
            .client
            .get(self.url("/sketches"))
            .query(&query.params())
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_sketch(&self, sketch: &NewSketch) -> Result<Sketch, ClientError> {
        let response = self
            .client
            .post(self.url("/sketches"))
            .json(sketch)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_sketch(&self, id: DbId, fields: &SketchFields) -> Result<Sketch, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/sketches/{id}")))
            .json(fields)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_sketch(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/sketches/{id}")))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
