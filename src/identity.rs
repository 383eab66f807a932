//! Anonymous user identity
//!
//! The identifier only tags the session for display. It is taken from
//! `TENSE_TRAINER_USER_ID` when set, otherwise read from (or created in)
//! `identity.json` in the data directory, and falls back to a random,
//! unpersisted identifier when that file cannot be used.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Environment variable carrying a caller-supplied identity
pub const USER_ID_ENV: &str = "TENSE_TRAINER_USER_ID";

/// How the identifier was obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentitySource {
    /// Supplied through the environment
    Token,
    /// Persisted anonymous identifier
    Anonymous,
    /// Random identifier for this run only
    #[default]
    Local,
}

/// Identity of the person practising
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub source: IdentitySource,
    /// Set once the identity has been established
    pub ready: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredIdentity {
    user_id: String,
}

impl Identity {
    /// Establish the identity for this run, never failing
    pub fn establish(data_dir: Option<&Path>) -> Self {
        if let Ok(token) = std::env::var(USER_ID_ENV) {
            if !token.trim().is_empty() {
                return Self { user_id: token.trim().to_string(), source: IdentitySource::Token, ready: true };
            }
        }

        if let Some(dir) = data_dir {
            match Self::load_or_create(&dir.join("identity.json")) {
                Ok(user_id) => return Self { user_id, source: IdentitySource::Anonymous, ready: true },
                Err(e) => tracing::warn!("Falling back to a local identity: {:#}", e),
            }
        }

        Self::local()
    }

    /// A random identity that is not persisted
    pub fn local() -> Self {
        Self { user_id: Uuid::new_v4().to_string(), source: IdentitySource::Local, ready: true }
    }

    fn load_or_create(path: &Path) -> Result<String> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read identity from {:?}", path))?;
            let stored: StoredIdentity =
                serde_json::from_str(&contents).with_context(|| "Failed to parse identity.json")?;
            return Ok(stored.user_id);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let stored = StoredIdentity { user_id: Uuid::new_v4().to_string() };
        let contents =
            serde_json::to_string_pretty(&stored).with_context(|| "Failed to serialize identity")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write identity to {:?}", path))?;

        tracing::info!("Created anonymous identity {}", stored.user_id);
        Ok(stored.user_id)
    }

    /// First eight characters, for the status line
    pub fn short_id(&self) -> &str {
        let end = self.user_id.char_indices().nth(8).map(|(i, _)| i).unwrap_or(self.user_id.len());
        &self.user_id[..end]
    }
}
