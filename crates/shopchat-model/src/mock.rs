// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{ChatEnvelope, ChatError, ChatRequest, HealthReport};

/// Deterministic offline backend.  Echoes the user message back as the
/// reply's `answer`.
#[derive(Default)]
pub struct EchoBackend;

#[async_trait]
impl crate::ChatBackend for EchoBackend {
    fn name(&self) -> &str {
        "echo"
    }

    fn endpoint(&self) -> &str {
        "mock://echo"
    }

    async fn send(&self, req: &ChatRequest) -> Result<ChatEnvelope, ChatError> {
        Ok(ChatEnvelope::success(json!({
            "answer": format!("ECHO: {}", req.message),
        })))
    }

    async fn health(&self) -> Result<HealthReport, ChatError> {
        Ok(HealthReport { status: "healthy".into(), ..HealthReport::default() })
    }
}

/// One scripted reply: a raw JSON body, or a transport failure message.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Body(Value),
    TransportError(String),
}

/// A pre-scripted backend.  Each call to `send` pops the next reply from the
/// front of the queue and records the request, so tests can assert on both
/// what was sent and how the reply was rendered.
#[derive(Clone)]
pub struct ScriptedMockBackend {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    /// Every request seen by this backend, in call order.
    pub requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedMockBackend {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Convenience: every listed body is returned once, in order.
    pub fn with_bodies(bodies: impl IntoIterator<Item = Value>) -> Self {
        Self::new(bodies.into_iter().map(ScriptedReply::Body).collect())
    }

    /// Convenience: a single successful reply with the given `data` payload.
    pub fn success(data: Value) -> Self {
        Self::with_bodies([json!({ "status": "success", "data": data })])
    }

    /// Convenience: a single transport failure.
    pub fn unreachable() -> Self {
        Self::new(vec![ScriptedReply::TransportError("connection refused".into())])
    }

    /// Snapshot of the requests seen so far.
    pub fn sent(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl crate::ChatBackend for ScriptedMockBackend {
    fn name(&self) -> &str {
        "scripted-mock"
    }

    fn endpoint(&self) -> &str {
        "mock://scripted"
    }

    async fn send(&self, req: &ChatRequest) -> Result<ChatEnvelope, ChatError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(req.clone());
        }
        let next = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        match next {
            Some(ScriptedReply::Body(v)) => Ok(ChatEnvelope::from_value(v)),
            Some(ScriptedReply::TransportError(msg)) => Err(ChatError::Unavailable(msg)),
            // Default fallback when all scripts are consumed
            None => Ok(ChatEnvelope::success(json!({ "answer": "[no more scripts]" }))),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
