// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::Arc;

use shopchat_model::{ChatBackend, ChatError, ChatRequest, Product, ReplyData, Store};
use thiserror::Error;
use tracing::{debug, warn};

use crate::controller::{Completion, Outbound};

/// Bot bubble shown when the service could not be reached or answered with
/// something that is not JSON.
pub const CONNECTION_ERROR_NOTICE: &str = "⚠ Connection error. Please try again later.";

/// Bot bubble shown when the service answered but reported a failure.
pub const GENERIC_FAILURE_NOTICE: &str =
    "Sorry, I couldn’t process your request. Please try again.";

/// One renderable piece of a successful reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyFragment {
    Text(String),
    Carousel(Vec<Product>),
    Store(Store),
    Details(Product),
}

/// Why a send produced no renderable reply.  Both kinds are recoverable and
/// end up as a single apologetic bot bubble.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatFailure {
    #[error("chat service unreachable: {0}")]
    Transport(String),
    #[error("chat service rejected the request: {0}")]
    Application(String),
}

impl ChatFailure {
    /// The text shown to the user for this failure.
    pub fn notice(&self) -> &'static str {
        match self {
            ChatFailure::Transport(_) => CONNECTION_ERROR_NOTICE,
            ChatFailure::Application(_) => GENERIC_FAILURE_NOTICE,
        }
    }
}

impl From<ChatError> for ChatFailure {
    fn from(e: ChatError) -> Self {
        ChatFailure::Transport(error_chain(&e))
    }
}

/// Sends user turns to the chat service and turns replies into fragments.
#[derive(Clone)]
pub struct ChatClient {
    backend: Arc<dyn ChatBackend>,
}

impl ChatClient {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn ChatBackend {
        self.backend.as_ref()
    }

    /// One request, no retry.
    pub async fn send(&self, request: &ChatRequest) -> Result<Vec<ReplyFragment>, ChatFailure> {
        debug!(
            backend = self.backend.name(),
            session = %request.session_id,
            "sending chat message"
        );
        let envelope = self.backend.send(request).await.map_err(|e| {
            let failure = ChatFailure::from(e);
            warn!(endpoint = self.backend.endpoint(), "{failure}");
            failure
        })?;

        let service_error = envelope.error.clone();
        let reply = envelope.into_reply().map_err(|rejection| {
            let detail = match service_error {
                Some(msg) => format!("{rejection} ({msg})"),
                None => rejection.to_string(),
            };
            let failure = ChatFailure::Application(detail);
            warn!(endpoint = self.backend.endpoint(), "{failure}");
            failure
        })?;

        let fragments = plan_reply(reply);
        debug!(fragments = fragments.len(), "chat reply received");
        Ok(fragments)
    }

    /// Send an outbound dispatch and pair the result with its ticket.
    pub async fn deliver(&self, outbound: Outbound) -> Completion {
        let result = self.send(&outbound.request).await;
        Completion { ticket: outbound.ticket, result }
    }
}

/// Lay out a successful reply in display order: answer, carousel, store
/// cards, detail card, closing text.  Each part is independent of the
/// others; absent or empty parts are skipped.
pub fn plan_reply(reply: ReplyData) -> Vec<ReplyFragment> {
    let mut out = Vec::new();

    if let Some(answer) = reply.answer.filter(|a| !a.is_empty()) {
        out.push(ReplyFragment::Text(answer));
    }
    if let Some(products) = reply.products.filter(|p| !p.is_empty()) {
        out.push(ReplyFragment::Carousel(products));
    }
    out.extend(reply.stores.unwrap_or_default().into_iter().map(ReplyFragment::Store));
    if let Some(details) = reply.product_details.filter(Product::has_id) {
        out.push(ReplyFragment::Details(details));
    }
    if let Some(end) = reply.end.filter(|e| !e.is_empty()) {
        out.push(ReplyFragment::Text(end));
    }

    out
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        out.push_str(": ");
        out.push_str(&s.to_string());
        source = s.source();
    }
    out
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shopchat_model::{ScriptedMockBackend, ScriptedReply};

    use super::*;

    fn client(backend: ScriptedMockBackend) -> ChatClient {
        ChatClient::new(Arc::new(backend))
    }

    fn reply(v: serde_json::Value) -> ReplyData {
        serde_json::from_value(v).unwrap()
    }

    // ── plan_reply ────────────────────────────────────────────────────────────

    #[test]
    fn answer_only_is_one_text_fragment() {
        let plan = plan_reply(reply(json!({"answer": "Hello"})));
        assert_eq!(plan, vec![ReplyFragment::Text("Hello".into())]);
    }

    #[test]
    fn full_reply_in_fixed_order() {
        let plan = plan_reply(reply(json!({
            "end": "Bye",
            "product_details": {"product_id": "7", "product_name": "D"},
            "stores": [{"store_name": "S1"}, {"store_name": "S2"}],
            "products": [{"product_name": "P"}],
            "answer": "Hi"
        })));
        let kinds: Vec<&str> = plan
            .iter()
            .map(|f| match f {
                ReplyFragment::Text(_) => "text",
                ReplyFragment::Carousel(_) => "carousel",
                ReplyFragment::Store(_) => "store",
                ReplyFragment::Details(_) => "details",
            })
            .collect();
        assert_eq!(kinds, ["text", "carousel", "store", "store", "details", "text"]);
        assert_eq!(plan[0], ReplyFragment::Text("Hi".into()));
        assert_eq!(plan[5], ReplyFragment::Text("Bye".into()));
        match (&plan[2], &plan[3]) {
            (ReplyFragment::Store(a), ReplyFragment::Store(b)) => {
                assert_eq!((a.store_name.as_str(), b.store_name.as_str()), ("S1", "S2"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn products_and_stores_without_text() {
        let plan = plan_reply(reply(json!({
            "products": [{"product_name": "A"}, {"product_name": "B"}],
            "stores": [{"store_name": "S"}]
        })));
        assert_eq!(plan.len(), 2);
        assert!(matches!(&plan[0], ReplyFragment::Carousel(p) if p.len() == 2));
        assert!(matches!(&plan[1], ReplyFragment::Store(_)));
        assert!(!plan.iter().any(|f| matches!(f, ReplyFragment::Text(_))));
    }

    #[test]
    fn empty_parts_are_skipped() {
        let plan = plan_reply(reply(json!({
            "answer": "",
            "products": [],
            "stores": [],
            "end": ""
        })));
        assert!(plan.is_empty());
    }

    #[test]
    fn details_without_id_are_skipped() {
        let plan = plan_reply(reply(json!({"product_details": {"product_name": "X"}})));
        assert!(plan.is_empty());
    }

    // ── send ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn send_forwards_message_and_session() {
        let backend = ScriptedMockBackend::success(json!({"answer": "ok"}));
        let c = client(backend.clone());
        let out = c.send(&ChatRequest::new("tv under 40k", "sess-1")).await.unwrap();
        assert_eq!(out, vec![ReplyFragment::Text("ok".into())]);
        assert_eq!(backend.sent(), vec![ChatRequest::new("tv under 40k", "sess-1")]);
    }

    #[tokio::test]
    async fn transport_error_maps_to_connection_notice() {
        let c = client(ScriptedMockBackend::unreachable());
        let err = c.send(&ChatRequest::new("x", "s")).await.unwrap_err();
        assert!(matches!(err, ChatFailure::Transport(_)));
        assert_eq!(err.notice(), CONNECTION_ERROR_NOTICE);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_generic_notice() {
        let c = client(ScriptedMockBackend::with_bodies([json!({"status": "error"})]));
        let err = c.send(&ChatRequest::new("x", "s")).await.unwrap_err();
        assert!(matches!(err, ChatFailure::Application(_)));
        assert_eq!(err.notice(), GENERIC_FAILURE_NOTICE);
    }

    #[tokio::test]
    async fn missing_data_maps_to_generic_notice() {
        let c = client(ScriptedMockBackend::with_bodies([json!({"status": "success"})]));
        let err = c.send(&ChatRequest::new("x", "s")).await.unwrap_err();
        assert_eq!(err.notice(), GENERIC_FAILURE_NOTICE);
    }

    #[tokio::test]
    async fn service_error_text_is_kept_in_failure_detail() {
        let c = client(ScriptedMockBackend::with_bodies([json!({"error": "redis down"})]));
        let err = c.send(&ChatRequest::new("x", "s")).await.unwrap_err();
        assert!(err.to_string().contains("redis down"), "{err}");
    }

    #[tokio::test]
    async fn malformed_products_do_not_hide_answer_and_end() {
        let c = client(ScriptedMockBackend::success(json!({
            "answer": "Hi",
            "products": "none",
            "end": "Bye"
        })));
        let out = c.send(&ChatRequest::new("x", "s")).await.unwrap();
        assert_eq!(
            out,
            vec![ReplyFragment::Text("Hi".into()), ReplyFragment::Text("Bye".into())]
        );
    }

    #[tokio::test]
    async fn falsy_answer_and_zero_id_render_nothing() {
        let c = client(ScriptedMockBackend::success(json!({
            "answer": false,
            "product_details": {"product_id": 0, "product_name": "TV"}
        })));
        let out = c.send(&ChatRequest::new("x", "s")).await.unwrap();
        assert!(out.is_empty(), "{out:?}");
    }

    #[tokio::test]
    async fn deliver_pairs_result_with_ticket() {
        let backend = ScriptedMockBackend::new(vec![ScriptedReply::TransportError("down".into())]);
        let c = client(backend);
        let outbound = Outbound {
            ticket: crate::Ticket { session: "s".into(), seq: 3 },
            request: ChatRequest::new("x", "s"),
        };
        let done = c.deliver(outbound).await;
        assert_eq!(done.ticket.seq, 3);
        assert!(done.result.is_err());
    }
}
