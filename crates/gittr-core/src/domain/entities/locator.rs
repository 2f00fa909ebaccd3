use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Where a template lives: `<url>@<refspec>`.
///
/// The split happens on the last `@` so that `git@host:org/repo.git@main`
/// keeps its user part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLocator {
    url: String,
    refspec: String,
}

impl TemplateLocator {
    pub fn new(url: impl Into<String>, refspec: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            refspec: refspec.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn refspec(&self) -> &str {
        &self.refspec
    }
}

impl FromStr for TemplateLocator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidLocator {
            locator: s.to_string(),
        };

        let (url, refspec) = s.rsplit_once('@').ok_or_else(invalid)?;
        if url.is_empty() || refspec.is_empty() || refspec.contains(':') {
            return Err(invalid());
        }

        Ok(Self::new(url, refspec))
    }
}

impl fmt::Display for TemplateLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.url, self.refspec)
    }
}
