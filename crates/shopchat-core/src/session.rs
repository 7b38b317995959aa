// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};
use uuid::Uuid;

/// Owns the identifier of the current conversation.
///
/// The identifier is a random (version 4) UUID in its hyphenated text form.
/// It is replaced whenever the conversation is closed.
#[derive(Debug, Clone)]
pub struct SessionManager {
    current: String,
}

impl SessionManager {
    pub fn new() -> Self {
        Self { current: random_uuid().to_string() }
    }

    /// The identifier sent with every outbound message.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Replace the current identifier with a fresh one and return it.
    pub fn new_session(&mut self) -> &str {
        self.current = random_uuid().to_string();
        debug!(session = %self.current, "new chat session");
        &self.current
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a version 4 UUID from 16 random bytes.
///
/// The bytes come from the OS CSPRNG.  If that source is unavailable a
/// generator seeded from the wall clock fills them instead, so this never
/// fails.
pub fn random_uuid() -> Uuid {
    let mut bytes = [0u8; 16];
    if let Err(e) = OsRng.try_fill_bytes(&mut bytes) {
        warn!(error = %e, "OS random source unavailable, using time-seeded generator");
        StdRng::seed_from_u64(clock_seed()).fill_bytes(&mut bytes);
    }
    // Sets the version nibble to 4 and the variant bits to 0b10.
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
