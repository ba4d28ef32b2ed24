//! Recovers a [`Recommendation`] from free-form reasoning-service text.
//!
//! Recovery is attempted in order, each step only if the previous failed:
//!
//! 1. parse the text as-is
//! 2. strip a surrounding code fence (with optional language tag) and parse
//! 3. quote bare `identifier:` keys at line start in the stripped text and parse
//! 4. give up and return the manual-review placeholder
//!
//! A document that parses but violates the schema counts as a failure of that
//! step. The normalizer never returns an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use super::Recommendation;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z0-9_+\-]*[ \t]*\n?(.*?)\s*(?:```)?\s*$")
        .expect("code fence pattern")
});

static BARE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)([A-Za-z_][A-Za-z0-9_]*)[ \t]*:")
        .expect("bare key pattern")
});

/// Why the placeholder was used instead of a parsed recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The service answered but no strategy recovered a valid document.
    Unparseable,
    /// The service call itself failed.
    ServiceUnavailable,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Unparseable => write!(f, "unparseable response"),
            FallbackReason::ServiceUnavailable => write!(f, "service unavailable"),
        }
    }
}

/// Outcome of normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRecommendation {
    Parsed(Recommendation),
    Fallback {
        recommendation: Recommendation,
        reason: FallbackReason,
    },
}

impl NormalizedRecommendation {
    pub fn fallback(reason: FallbackReason) -> Self {
        NormalizedRecommendation::Fallback {
            recommendation: Recommendation::fallback(),
            reason,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, NormalizedRecommendation::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            NormalizedRecommendation::Parsed(_) => None,
            NormalizedRecommendation::Fallback { reason, .. } => Some(*reason),
        }
    }

    pub fn recommendation(&self) -> &Recommendation {
        match self {
            NormalizedRecommendation::Parsed(recommendation)
            | NormalizedRecommendation::Fallback { recommendation, .. } => recommendation,
        }
    }

    pub fn into_recommendation(self) -> Recommendation {
        match self {
            NormalizedRecommendation::Parsed(recommendation)
            | NormalizedRecommendation::Fallback { recommendation, .. } => recommendation,
        }
    }
}

/// Stateless text-to-recommendation recovery.
pub struct RecommendationNormalizer;

impl RecommendationNormalizer {
    pub fn normalize(raw: &str) -> NormalizedRecommendation {
        if let Some(recommendation) = Self::parse(raw) {
            return NormalizedRecommendation::Parsed(recommendation);
        }

        let stripped = Self::strip_code_fence(raw);
        if let Some(recommendation) = Self::parse(&stripped) {
            tracing::debug!("Recovered recommendation after stripping code fence");
            return NormalizedRecommendation::Parsed(recommendation);
        }

        let quoted = Self::quote_bare_keys(&stripped);
        if let Some(recommendation) = Self::parse(&quoted) {
            tracing::debug!("Recovered recommendation after quoting bare keys");
            return NormalizedRecommendation::Parsed(recommendation);
        }

        tracing::warn!(
            reason = %FallbackReason::Unparseable,
            response_len = raw.len(),
            "Recommendation could not be recovered, using manual-review fallback"
        );
        NormalizedRecommendation::fallback(FallbackReason::Unparseable)
    }

    fn parse(text: &str) -> Option<Recommendation> {
        let recommendation: Recommendation = serde_json::from_str(text.trim()).ok()?;
        recommendation.validate().ok()?;
        Some(recommendation)
    }

    /// Removes a leading fence line (```, ```json, ...) and a trailing fence.
    fn strip_code_fence(text: &str) -> Cow<'_, str> {
        match CODE_FENCE.captures(text).and_then(|caps| caps.get(1)) {
            Some(body) => Cow::Borrowed(body.as_str()),
            None => Cow::Borrowed(text.trim()),
        }
    }

    fn quote_bare_keys(text: &str) -> Cow<'_, str> {
        BARE_KEY.replace_all(text, "$1\"$2\":")
    }
}
