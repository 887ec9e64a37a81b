//! Shared-secret gate and per-session access state.
//!
//! The gate holds the configured secret; whether a particular user is
//! through it is tracked by a [`Session`] value owned by whoever drives the
//! UI. Nothing here is global.

use tracing::{info, warn};


/// The configured secret.
#[derive(Clone)]
pub enum Secret {
    /// Compared as typed.
    Plain(String),
    /// BLAKE3 digest of `salt || secret`.
    Hashed { salt: String, digest: blake3::Hash },
}

impl Secret {
    pub fn hashed(salt: impl Into<String>, secret: &str) -> Self {
        let salt = salt.into();
        let digest = salted_digest(&salt, secret);
        Secret::Hashed { salt, digest }
    }

    fn matches(&self, submitted: &str) -> bool {
        // Both sides go through BLAKE3 so the final comparison is the
        // constant-time `Hash` equality.
        match self {
            Secret::Plain(secret) => {
                blake3::hash(secret.as_bytes()) == blake3::hash(submitted.as_bytes())
            }
            Secret::Hashed { salt, digest } => salted_digest(salt, submitted) == *digest,
        }
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Secret::Plain(_) => f.write_str("Secret::Plain(***)"),
            Secret::Hashed { salt, .. } => write!(f, "Secret::Hashed {{ salt: {salt:?} }}"),
        }
    }
}

/// Digest stored in configuration for a hashed secret.
pub fn salted_digest(salt: &str, secret: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(secret.as_bytes());
    hasher.finalize()
}

/// Checks submitted text against the configured secret.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    secret: Secret,
}

impl Gatekeeper {
    pub fn new(secret: Secret) -> Self {
        Self { secret }
    }

    /// `true` when `submitted` is exactly the secret. Empty input never
    /// matches.
    pub fn check_access(&self, submitted: &str) -> bool {
        !submitted.is_empty() && self.secret.matches(submitted)
    }
}

/// Where a session stands with respect to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessState {
    /// Nothing submitted yet.
    #[default]
    Locked,
    /// Last submission was wrong; re-prompt with an error.
    Denied,
    /// Through the gate for the rest of the session.
    Unlocked,
}

/// Access state for one user session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: AccessState,
    attempts: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == AccessState::Unlocked
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Submit a secret. Once unlocked, further submissions are ignored and
    /// the session stays unlocked.
    pub fn submit(&mut self, gate: &Gatekeeper, submitted: &str) -> AccessState {
        if self.is_unlocked() {
            return self.state;
        }
        self.attempts += 1;
        self.state = if gate.check_access(submitted) {
            info!(attempts = self.attempts, "access granted");
            AccessState::Unlocked
        } else {
            warn!(attempts = self.attempts, "access denied");
            AccessState::Denied
        };
        self.state
    }
}
