//! The fixed instant template functions read time from.

use chrono::{DateTime, Utc};

/// A single instant captured once per render.
///
/// Convergence re-renders the same text many times; reading the wall clock on
/// every call could make two passes differ only because a second ticked over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderClock {
    instant: DateTime<Utc>,
}

impl RenderClock {
    /// Capture the current time.
    pub fn system() -> Self {
        Self::fixed(Utc::now())
    }

    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Parse an RFC 3339 timestamp such as `2024-01-31T12:00:00Z`.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self::fixed(
            DateTime::parse_from_rfc3339(rfc3339)?.with_timezone(&Utc),
        ))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl Default for RenderClock {
    fn default() -> Self {
        Self::system()
    }
}
