// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! JSON-over-HTTP driver for the chat service.
//!
//! One `POST` per user turn with `{ "message", "session_id" }`; the reply is
//! whatever JSON the service sends back, regardless of HTTP status.  The
//! service answers application errors with a JSON `{"error": ...}` body and a
//! 4xx/5xx code, and those must reach the widget as application failures,
//! not transport failures.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{ChatEnvelope, ChatError, ChatRequest, HealthReport};

/// Chat backend talking to the real service over HTTP.
pub struct HttpBackend {
    /// Full chat URL, e.g. `http://192.168.29.62:8001/chat`.
    chat_url: String,
    /// Full health probe URL.
    health_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Build a backend for the given URLs.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(
        chat_url: impl Into<String>,
        health_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::Client(e.to_string()))?;
        Ok(Self {
            chat_url: chat_url.into(),
            health_url: health_url.into(),
            client,
        })
    }
}

#[async_trait]
impl crate::ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    fn endpoint(&self) -> &str {
        &self.chat_url
    }

    async fn send(&self, req: &ChatRequest) -> Result<ChatEnvelope, ChatError> {
        debug!(
            url = %self.chat_url,
            session_id = %req.session_id,
            msg_len = req.message.len(),
            "posting chat message"
        );
        let resp = self
            .client
            .post(&self.chat_url)
            .json(req)
            .send()
            .await
            .map_err(|e| ChatError::transport(&self.chat_url, e))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ChatError::transport(&self.chat_url, e))?;
        debug!(http_status = %status, body_len = body.len(), "chat reply received");

        let value: Value = serde_json::from_slice(&body)?;
        Ok(ChatEnvelope::from_value(value))
    }

    async fn health(&self) -> Result<HealthReport, ChatError> {
        debug!(url = %self.health_url, "probing health endpoint");
        let resp = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| ChatError::transport(&self.health_url, e))?;
        let body = resp
            .bytes()
            .await
            .map_err(|e| ChatError::transport(&self.health_url, e))?;
        Ok(serde_json::from_slice(&body)?)
    }
}
