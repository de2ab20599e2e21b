//! Canonical hashing: SHA-256 over a domain prefix plus payload.
//!
//! Every digest in the workspace (graph, policy, report, canonical keys)
//! goes through [`canonical_hash`], so two digests are comparable exactly when
//! their domains match.

use sha2::{Digest, Sha256};

pub use crate::proof::hash_domain::HashDomain;

const PREFIX: &str = "sha256:";

/// A SHA-256 digest rendered as `"sha256:<64 lowercase hex>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    bytes: [u8; 32],
    rendered: String,
}

impl ContentHash {
    fn from_digest(bytes: [u8; 32]) -> Self {
        let rendered = format!("{PREFIX}{}", hex::encode(bytes));
        Self { bytes, rendered }
    }

    /// Parse a rendered digest (as found in a report).
    ///
    /// Returns `None` unless `s` is `sha256:` followed by exactly 64 lowercase
    /// hex digits.
    #[must_use]
    pub fn from_rendered(s: &str) -> Option<Self> {
        let hex_part = s.strip_prefix(PREFIX)?;
        if hex_part.len() != 64 || hex_part.bytes().any(|b| b.is_ascii_uppercase()) {
            return None;
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_part, &mut bytes).ok()?;
        Some(Self::from_digest(bytes))
    }

    /// Always `"sha256"`.
    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        "sha256"
    }

    /// The 64-character hex digest.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.rendered[PREFIX.len()..]
    }

    /// First 12 hex characters, for log lines and error details.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.rendered[PREFIX.len()..PREFIX.len() + 12]
    }

    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// The rendered form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// `sha256(domain.as_bytes() || data)`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hasher.finalize());
    ContentHash::from_digest(bytes)
}
