use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The status marker the chat service sends for a usable reply.
pub const SUCCESS_STATUS: &str = "success";

// ─── Request ──────────────────────────────────────────────────────────────────

/// Body of one `POST` to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self { message: message.into(), session_id: session_id.into() }
    }
}

// ─── Response envelope ────────────────────────────────────────────────────────

/// Top-level reply body as sent by the service.
///
/// Kept loose on purpose: anything that parsed as JSON lands here, and
/// [`ChatEnvelope::into_reply`] decides whether it is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    /// Error text the service includes with non-success replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Why a well-formed reply cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// `status` missing or different from `"success"`.
    Status(Option<String>),
    /// `status` was `"success"` but `data` is absent or null.
    MissingData,
    /// `data` is present but not an object of the expected shape.
    MalformedData(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Status(Some(s)) => write!(f, "service reported status {s:?}"),
            Rejection::Status(None) => write!(f, "service reply has no status"),
            Rejection::MissingData => write!(f, "service reply has no data"),
            Rejection::MalformedData(e) => write!(f, "service reply data is malformed: {e}"),
        }
    }
}

impl ChatEnvelope {
    /// Interpret an arbitrary JSON value as an envelope.  Non-object values
    /// produce an envelope with neither status nor data.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                status: map.get("status").and_then(Value::as_str).map(str::to_string),
                error: map.get("error").and_then(Value::as_str).map(str::to_string),
                data: map.remove("data").filter(|d| !d.is_null()),
            },
            _ => Self::default(),
        }
    }

    /// Convenience constructor for a successful reply.
    pub fn success(data: Value) -> Self {
        Self { status: Some(SUCCESS_STATUS.into()), data: Some(data), error: None }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }

    /// Validate status and payload, decoding the payload on success.
    pub fn into_reply(self) -> Result<ReplyData, Rejection> {
        if !self.is_success() {
            return Err(Rejection::Status(self.status));
        }
        let data = self.data.ok_or(Rejection::MissingData)?;
        serde_json::from_value(data).map_err(|e| Rejection::MalformedData(e.to_string()))
    }
}

// ─── Reply payload ────────────────────────────────────────────────────────────

/// The `data` object of a successful reply.  Every field is optional and
/// rendered independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyData {
    #[serde(default, deserialize_with = "lenient::truthy_text")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_list")]
    pub products: Option<Vec<Product>>,
    #[serde(default, deserialize_with = "lenient::opt_list")]
    pub stores: Option<Vec<Store>>,
    #[serde(default, deserialize_with = "lenient::opt_object")]
    pub product_details: Option<Product>,
    #[serde(default, deserialize_with = "lenient::truthy_text")]
    pub end: Option<String>,
}

impl ReplyData {
    pub fn products(&self) -> &[Product] {
        self.products.as_deref().unwrap_or_default()
    }

    pub fn stores(&self) -> &[Store] {
        self.stores.as_deref().unwrap_or_default()
    }
}

/// A product as described by the service.  Also used for the single
/// `product_details` card, where `product_id` gates rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::truthy_text", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_name: String,
    /// Display price string, e.g. `"₹30,999"`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_mrp: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_image: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_url: String,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub features: Vec<String>,
}

impl Product {
    /// True when this product carries a non-empty identifier.
    pub fn has_id(&self) -> bool {
        self.product_id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, deserialize_with = "lenient::text")]
    pub store_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: String,
    #[serde(default, alias = "timing", deserialize_with = "lenient::text")]
    pub timings: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
}

impl Store {
    /// Address with the optional locality fields appended, e.g.
    /// `"MG Road, Indore - 452001, MP"`.
    pub fn full_address(&self) -> String {
        let mut out = self.address.clone();
        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(", ");
            out.push_str(city);
        }
        if let Some(zip) = self.zipcode.as_deref().filter(|z| !z.is_empty()) {
            out.push_str(" - ");
            out.push_str(zip);
        }
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(", ");
            out.push_str(state);
        }
        out
    }
}

// ─── Health probe ─────────────────────────────────────────────────────────────

/// Reply of the service's health endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    /// Everything else the service reports (component states, counters).
    #[serde(flatten)]
    pub details: serde_json::Map<String, Value>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

// ─── Lenient field decoding ───────────────────────────────────────────────────

/// The service is backed by an LLM that does not always respect field types:
/// ids and prices arrive as numbers, lists arrive as `null` or as a string.
/// These helpers accept strings, numbers and booleans as text, treat `null`
/// as absent, and turn a wrongly shaped list or object into an absent field
/// so the rest of the reply still renders.
mod lenient {
    use serde::de::DeserializeOwned;

    use super::*;

    fn scalar_to_string(v: Value) -> Option<String> {
        match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(scalar_to_string(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_to_string(Value::deserialize(d)?))
    }

    /// Like [`opt_text`], but `false`, `0` and `""` count as absent.
    pub fn truthy_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => scalar_to_string(other).filter(|s| !s.is_empty()),
        })
    }

    /// A list whose items are decoded one by one.  Items of the wrong shape
    /// are skipped; a value that is not a list is absent.
    pub fn opt_list<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter(Value::is_object)
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        })
    }

    /// An object, or absent when the value has any other shape.
    pub fn opt_object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            v @ Value::Object(_) => serde_json::from_value(v).ok(),
            _ => None,
        })
    }

    pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
            other => scalar_to_string(other).into_iter().collect(),
        })
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_serialises_message_and_session_id() {
        let req = ChatRequest::new("show me phones", "abc");
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({"message": "show me phones", "session_id": "abc"}));
    }

    #[test]
    fn success_envelope_decodes_full_payload() {
        let env = ChatEnvelope::from_value(json!({
            "status": "success",
            "data": {
                "answer": "Here you go",
                "products": [{
                    "product_id": 42,
                    "product_name": "Phone",
                    "product_mrp": "₹9,999",
                    "product_image": "https://img/p.png",
                    "product_url": "https://shop/p",
                    "features": ["5G", "128 GB"]
                }],
                "stores": [{"store_name": "MG Road", "address": "12 MG Road", "timings": "10-9"}],
                "end": "Anything else?"
            }
        }));
        let reply = env.into_reply().unwrap();
        assert_eq!(reply.answer.as_deref(), Some("Here you go"));
        assert_eq!(reply.products().len(), 1);
        assert_eq!(reply.products()[0].product_id.as_deref(), Some("42"));
        assert_eq!(reply.products()[0].features, vec!["5G", "128 GB"]);
        assert_eq!(reply.stores()[0].timings, "10-9");
        assert_eq!(reply.end.as_deref(), Some("Anything else?"));
        assert!(reply.product_details.is_none());
    }

    #[test]
    fn non_success_status_is_rejected() {
        let env = ChatEnvelope::from_value(json!({"status": "error", "data": {"answer": "x"}}));
        assert_eq!(env.into_reply(), Err(Rejection::Status(Some("error".into()))));
    }

    #[test]
    fn missing_status_is_rejected() {
        let env = ChatEnvelope::from_value(json!({"error": "Missing 'message' in request"}));
        assert_eq!(env.error.as_deref(), Some("Missing 'message' in request"));
        assert_eq!(env.into_reply(), Err(Rejection::Status(None)));
    }

    #[test]
    fn null_data_counts_as_missing() {
        let env = ChatEnvelope::from_value(json!({"status": "success", "data": null}));
        assert_eq!(env.into_reply(), Err(Rejection::MissingData));
    }

    #[test]
    fn non_object_data_is_malformed() {
        let env = ChatEnvelope::from_value(json!({"status": "success", "data": "oops"}));
        assert!(matches!(env.into_reply(), Err(Rejection::MalformedData(_))));
    }

    #[test]
    fn non_object_body_has_no_status() {
        let env = ChatEnvelope::from_value(json!([1, 2, 3]));
        assert_eq!(env, ChatEnvelope::default());
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let env = ChatEnvelope::success(json!({"products": null, "stores": null}));
        let reply = env.into_reply().unwrap();
        assert!(reply.products().is_empty());
        assert!(reply.stores().is_empty());
    }

    #[test]
    fn wrongly_shaped_fields_are_dropped_individually() {
        let env = ChatEnvelope::success(json!({
            "answer": "Hi",
            "products": "none",
            "stores": [null, {"store_name": "A", "address": "1 Road"}, 7],
            "product_details": "n/a",
            "end": "Bye"
        }));
        let reply = env.into_reply().unwrap();
        assert_eq!(reply.answer.as_deref(), Some("Hi"));
        assert!(reply.products.is_none());
        assert_eq!(reply.stores().len(), 1);
        assert_eq!(reply.stores()[0].store_name, "A");
        assert!(reply.product_details.is_none());
        assert_eq!(reply.end.as_deref(), Some("Bye"));
    }

    #[test]
    fn falsy_text_and_ids_count_as_absent() {
        let env = ChatEnvelope::success(json!({
            "answer": false,
            "end": "",
            "product_details": {"product_id": 0, "product_name": "TV"}
        }));
        let reply = env.into_reply().unwrap();
        assert!(reply.answer.is_none());
        assert!(reply.end.is_none());
        assert!(!reply.product_details.unwrap().has_id());

        let p: Product = serde_json::from_value(json!({"product_id": 17})).unwrap();
        assert!(p.has_id());
    }

    #[test]
    fn product_missing_features_defaults_to_empty() {
        let p: Product = serde_json::from_value(json!({"product_name": "TV", "features": null})).unwrap();
        assert!(p.features.is_empty());
        assert!(!p.has_id());
    }

    #[test]
    fn blank_product_id_does_not_count() {
        let p: Product = serde_json::from_value(json!({"product_id": "  "})).unwrap();
        assert!(!p.has_id());
    }

    #[test]
    fn store_accepts_singular_timing_key() {
        let s: Store = serde_json::from_value(json!({
            "store_name": "Lotus CP",
            "address": "Block A",
            "timing": "11 AM - 9 PM",
            "city": "Delhi",
            "zipcode": 110001
        }))
        .unwrap();
        assert_eq!(s.timings, "11 AM - 9 PM");
        assert_eq!(s.full_address(), "Block A, Delhi - 110001");
    }

    #[test]
    fn health_report_keeps_extra_fields() {
        let h: HealthReport = serde_json::from_value(json!({
            "status": "healthy",
            "redis": "connected"
        }))
        .unwrap();
        assert!(h.is_healthy());
        assert_eq!(h.details["redis"], "connected");
    }
}
