// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Failure to obtain a JSON reply from the chat service.
///
/// Everything here is a transport-level problem from the widget's point of
/// view: the request never produced a body it could look at.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("{0}")]
    Unavailable(String),
}

impl ChatError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport { url: url.to_string(), source }
    }
}
