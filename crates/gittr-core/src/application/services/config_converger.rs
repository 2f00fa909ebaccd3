//! Config Converger - fixed-point resolution of the configuration document.
//!
//! The configuration is itself written in the template language, so a value
//! may reference other values (earlier or later in the file, possibly
//! templated themselves). One render is not enough: substituted text can
//! introduce more expressions. The converger re-renders the document line by
//! line against the mapping parsed from its own current text until a pass
//! leaves every line unchanged.
//!
//! ## Algorithm
//!
//! ```text
//! current = lines; next = lines; frontier = none
//! loop:
//!     working = next[..=frontier] ++ current[frontier+1..]
//!     mapping = parse(working)
//!     next    = [render(line, mapping) for line in working]
//!     frontier = first index where working and next differ
//!     current = working
//!     if no difference: converged
//! ```
//!
//! Lines up to and including the frontier come from the latest rendered pass;
//! later lines keep their previous text. The loop is bounded by
//! `max_iterations`.

use tracing::{debug, instrument, trace};

use crate::{
    application::services::TemplateEngine,
    domain::{ConfigDocument, ConfigMapping, DomainError},
    error::GittrResult,
};

/// Default pass ceiling.
pub const DEFAULT_MAX_ITERATIONS: usize = 64;

/// Outcome of a successful convergence.
#[derive(Debug, Clone, PartialEq)]
pub struct Convergence {
    /// The converged document.
    pub document: ConfigDocument,
    /// The mapping parsed from `document`.
    pub mapping: ConfigMapping,
    /// Number of render passes performed.
    pub iterations: usize,
    /// First differing line after each pass; the last entry is `None`.
    pub trajectory: Vec<Option<usize>>,
}

/// Fixed-point resolver for self-templating configuration documents.
pub struct ConfigConverger<'a> {
    engine: &'a TemplateEngine,
    max_iterations: usize,
}

impl<'a> ConfigConverger<'a> {
    pub fn new(engine: &'a TemplateEngine) -> Self {
        Self {
            engine,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the pass ceiling (at least one pass always runs).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    #[instrument(skip_all, fields(lines = document.lines().len()))]
    pub fn converge(&self, document: &ConfigDocument) -> GittrResult<Convergence> {
        let mut current: Vec<String> = document.lines().to_vec();
        let mut next: Vec<String> = current.clone();
        let mut frontier: Option<usize> = None;
        let mut trajectory = Vec::new();

        for pass in 1..=self.max_iterations {
            let keep = frontier.map_or(0, |f| f + 1);
            let working: Vec<String> = next[..keep]
                .iter()
                .chain(current[keep..].iter())
                .cloned()
                .collect();

            let mapping = document.with_lines(working.clone()).parse()?;
            next = working
                .iter()
                .map(|line| self.engine.render(line, &mapping))
                .collect::<GittrResult<Vec<_>>>()?;

            let diff = first_difference(&working, &next);
            trajectory.push(diff);
            trace!(pass, frontier = ?diff, "convergence pass");
            current = working;

            match diff {
                None => {
                    debug!(passes = pass, "configuration converged");
                    return Ok(Convergence {
                        document: document.with_lines(current),
                        mapping,
                        iterations: pass,
                        trajectory,
                    });
                }
                Some(index) => frontier = Some(index),
            }
        }

        Err(DomainError::ConvergenceFailed {
            iterations: self.max_iterations,
            line: frontier.unwrap_or(0),
        }
        .into())
    }
}

/// First position where the two sequences differ (a length mismatch counts).
pub fn first_difference<L, R>(left: &[L], right: &[R]) -> Option<usize>
where
    L: PartialEq<R>,
{
    let common = left.len().min(right.len());
    (0..common)
        .find(|&i| left[i] != right[i])
        .or_else(|| (left.len() != right.len()).then_some(common))
}
