// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// Chat endpoint the widget talks to when nothing else is configured.
pub const DEFAULT_CHAT_URL: &str = "http://192.168.29.62:8001/chat";

/// Distance (in scroll units) one carousel navigation step moves the strip.
pub const DEFAULT_CAROUSEL_STEP: u32 = 250;

/// Serde default helper: returns `true`.
///
/// `#[serde(default)]` on a `bool` always falls back to `false`, so fields
/// that are on unless switched off need a named function.
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Absolute URL of the chat endpoint (`POST`, JSON body).
    #[serde(default = "default_chat_url")]
    pub url: String,
    /// Health probe URL.  When unset it is derived from `url` by replacing
    /// the last path segment with `health`.
    #[serde(default)]
    pub health_url: Option<String>,
    /// Request timeout in seconds.  `0` (the default) waits indefinitely,
    /// which leaves the typing indicator up for as long as the service hangs.
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_chat_url() -> String {
    DEFAULT_CHAT_URL.into()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_chat_url(),
            health_url: None,
            timeout_secs: 0,
        }
    }
}

impl EndpointConfig {
    /// The effective health probe URL.
    pub fn resolved_health_url(&self) -> String {
        if let Some(url) = &self.health_url {
            return url.clone();
        }
        let base = self.url.trim_end_matches('/');
        match base.rfind('/') {
            // Keep the scheme's "//" intact: only strip a real path segment.
            Some(idx) if base[..idx].contains("//") && !base[..idx].ends_with('/') => {
                format!("{}/health", &base[..idx])
            }
            _ => format!("{base}/health"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Business name prepended to a store address in the map search query.
    #[serde(default = "default_business_name")]
    pub business_name: String,
    /// Map search base URL; the `query` parameter is appended to it.
    #[serde(default = "default_maps_search_url")]
    pub maps_search_url: String,
    /// Scroll distance of one carousel navigation step.
    #[serde(default = "default_carousel_step")]
    pub carousel_step: u32,
    /// Format message timestamps as `HH:MM` (true) or `hh:MM AM` (false).
    #[serde(default = "default_true")]
    pub clock_24h: bool,
    /// Insert the service's `answer` / `end` text as raw HTML instead of
    /// escaping it.  Product and store fields are always escaped.
    #[serde(default)]
    pub trust_bot_markup: bool,
}

fn default_business_name() -> String {
    "Lotus Electronics".into()
}
fn default_maps_search_url() -> String {
    "https://www.google.com/maps/search/?api=1".into()
}
fn default_carousel_step() -> u32 {
    DEFAULT_CAROUSEL_STEP
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            business_name: default_business_name(),
            maps_search_url: default_maps_search_url(),
            carousel_step: DEFAULT_CAROUSEL_STEP,
            clock_24h: true,
            trust_bot_markup: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Use plain ASCII borders/indicators instead of Unicode box-drawing and
    /// Braille characters.  Can also be forced with `SHOPCHAT_ASCII=1`.
    #[serde(default)]
    pub ascii: bool,
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
