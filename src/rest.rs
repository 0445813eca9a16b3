use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde_json::{json, Value};

use crate::error::Error;

/// Discord REST client: gateway discovery and the outbound effects the
/// command layer produces (messages, embeds, reactions).
pub struct RestClient {
    http: Client,
    base_url: String,
    token: String,
}

impl RestClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            token,
        }
    }

    async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, Error> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method, &url)
            .header("Authorization", format!("Bot {}", self.token));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));
        if is_json {
            Ok(response.json().await?)
        } else {
            Ok(Value::String(response.text().await?))
        }
    }

    /// Resolve the WebSocket URL of the gateway.
    pub async fn gateway_url(&self) -> Result<String, Error> {
        let body = self.call(Method::GET, "/gateway", None).await?;
        body["url"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Protocol("gateway response missing url".to_string()))
    }

    pub async fn send_message(&self, channel_id: &str, content: &str) -> Result<Value, Error> {
        tracing::debug!("sending message to channel {channel_id}");
        self.call(
            Method::POST,
            &format!("/channels/{channel_id}/messages"),
            Some(&json!({ "content": content })),
        )
        .await
    }

    pub async fn send_embed_message(
        &self,
        channel_id: &str,
        content: &str,
        embed: Value,
    ) -> Result<Value, Error> {
        tracing::debug!("sending embed message to channel {channel_id}");
        self.call(
            Method::POST,
            &format!("/channels/{channel_id}/messages"),
            Some(&json!({ "content": content, "embed": embed })),
        )
        .await
    }

    pub async fn add_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<Value, Error> {
        tracing::debug!("reacting to message {message_id} in channel {channel_id}");
        self.call(
            Method::PUT,
            &format!("/channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me"),
            None,
        )
        .await
    }
}
