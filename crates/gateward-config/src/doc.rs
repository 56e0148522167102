//! The on-disk whitelist document.

use serde::{Deserialize, Serialize};

/// The name seeded into a brand-new document so the first operator is
/// not locked out of their own proxy.
pub(crate) const SEED_NAME: &str = "admin";

/// The persisted whitelist document.
///
/// Field names are part of the file format and round-trip exactly:
/// `whitelist` (the enabled switch), `language`, `whitelisted` (the
/// permanent names, order insignificant). Missing fields decode to the
/// same defaults a fresh document carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDoc {
    /// Whether the whitelist feature is switched on.
    #[serde(default = "default_enabled")]
    pub whitelist: bool,

    /// Language code for the message set the caller renders.
    #[serde(default = "default_language")]
    pub language: String,

    /// The permanent names. Stored case is not trusted: values are
    /// lowercased on load regardless of how they were written.
    #[serde(default)]
    pub whitelisted: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for GateDoc {
    /// The document written on first run: enabled, English, one seed
    /// name.
    fn default() -> Self {
        Self {
            whitelist: default_enabled(),
            language: default_language(),
            whitelisted: vec![SEED_NAME.to_string()],
        }
    }
}

impl GateDoc {
    /// The recovery document after a failed read: default flags, empty
    /// permanent set. Failing open to "no access" beats crashing, and
    /// beats silently admitting everyone.
    pub fn fail_open() -> Self {
        Self {
            whitelisted: Vec::new(),
            ..Self::default()
        }
    }

    /// Canonicalizes loaded names to lowercase.
    pub(crate) fn normalize(&mut self) {
        for name in &mut self.whitelisted {
            *name = name.to_lowercase();
        }
    }
}
