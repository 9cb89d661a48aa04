use reqwest::{header, Client};
use serde_json::Value;
use tracing::error;
use url::Url;

use crate::error::ApiError;

const USER_AGENT: &str = "gitpod-finder";

/// Status code and fully-read body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Moves one JSON request body to the server and hands back the raw reply.
/// Interpreting the reply is left to the caller.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &Url, token: &str, body: &Value)
        -> Result<HttpReply, ApiError>;
}

impl<T: Transport> Transport for &T {
    async fn post_json(
        &self,
        url: &Url,
        token: &str,
        body: &Value,
    ) -> Result<HttpReply, ApiError> {
        (**self).post_json(url, token, body).await
    }
}

// No timeout is set: a stalled server stalls the scan.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &Url,
        token: &str,
        body: &Value,
    ) -> Result<HttpReply, ApiError> {
        let response = self
            .client
            .post(url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(body)
            .send()
            .await
            .inspect_err(|e| error!("POST {} failed: {}", url, e))?;

        let status = response.status().as_u16();
        // `text` consumes the response, so the connection is released here
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}
