//! Breach range lookup
//!
//! Hashes a password with SHA-1 and queries a k-anonymity range endpoint:
//! only the first 5 hex characters of the hash leave the process, the
//! remote returns every known breached suffix sharing that prefix and the
//! comparison happens locally.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::config::ValidatorConfig;

/// Length of the hash prefix sent to the range endpoint.
pub const PREFIX_LEN: usize = 5;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Breach range request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Breach range endpoint returned HTTP {0}")]
    Status(u16),
    #[error("Malformed breach range response: {0}")]
    MalformedResponse(String),
}

/// SHA-1 hash a password and return the uppercase hex digest (40 chars).
pub fn hash_password(password: &str) -> String {
    hex::encode_upper(Sha1::digest(password.as_bytes()))
}

/// Split a hex digest into its 5-char prefix and 35-char suffix.
pub fn split_hash(hash: &str) -> (&str, &str) {
    hash.split_at(PREFIX_LEN)
}

/// Breached hash suffixes sharing one prefix, in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreachRange {
    entries: Vec<(String, u64)>,
}

impl BreachRange {
    /// Parses a `SUFFIX:COUNT` body. Lines may end in LF or CRLF; blank
    /// lines are skipped.
    pub fn parse(body: &str) -> Result<Self, LookupError> {
        let mut entries = Vec::new();

        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (suffix, count) = line
                .split_once(':')
                .ok_or_else(|| LookupError::MalformedResponse(format!("missing ':' in {line:?}")))?;
            let count = count
                .trim()
                .parse::<u64>()
                .map_err(|_| LookupError::MalformedResponse(format!("bad count in {line:?}")))?;

            entries.push((suffix.trim().to_string(), count));
        }

        Ok(Self { entries })
    }

    pub fn contains_suffix(&self, suffix: &str) -> bool {
        self.entries
            .iter()
            .any(|(s, _)| s.eq_ignore_ascii_case(suffix))
    }

    /// Occurrence count reported for `suffix`, if present.
    pub fn count_for(&self, suffix: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(suffix))
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Anything that can answer a range query for a hash prefix.
pub trait RangeSource: Send + Sync {
    fn range(&self, prefix: &str) -> Result<BreachRange, LookupError>;
}

impl<F> RangeSource for F
where
    F: Fn(&str) -> Result<BreachRange, LookupError> + Send + Sync,
{
    fn range(&self, prefix: &str) -> Result<BreachRange, LookupError> {
        self(prefix)
    }
}

/// HTTP client for the public range endpoint.
pub struct PwnedRangeClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl PwnedRangeClient {
    pub fn new(config: &ValidatorConfig) -> Result<Self, LookupError> {
        Self::with_timeout(&config.range_url, config.timeout, &config.user_agent)
    }

    pub fn with_timeout(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl RangeSource for PwnedRangeClient {
    fn range(&self, prefix: &str) -> Result<BreachRange, LookupError> {
        let url = format!("{}/{}", self.base_url, prefix);

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Breach range request for prefix {} returned {}", prefix, status);
            return Err(LookupError::Status(status.as_u16()));
        }

        BreachRange::parse(&response.text()?)
    }
}

/// Memoises successful range responses per prefix.
pub struct CachedRangeSource<S> {
    inner: S,
    ranges: RwLock<HashMap<String, BreachRange>>,
}

impl<S: RangeSource> CachedRangeSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            ranges: RwLock::new(HashMap::new()),
        }
    }

    pub fn cached_prefixes(&self) -> usize {
        self.ranges.read().map(|g| g.len()).unwrap_or(0)
    }
}

impl<S: RangeSource> RangeSource for CachedRangeSource<S> {
    fn range(&self, prefix: &str) -> Result<BreachRange, LookupError> {
        if let Ok(guard) = self.ranges.read() {
            if let Some(range) = guard.get(prefix) {
                return Ok(range.clone());
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Breach range cache miss for prefix {}", prefix);

        let range = self.inner.range(prefix)?;
        if let Ok(mut guard) = self.ranges.write() {
            guard.insert(prefix.to_string(), range.clone());
        }
        Ok(range)
    }
}
