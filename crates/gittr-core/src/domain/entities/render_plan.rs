use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::domain::{
    entities::{common::LogicalPath, tree::TreeSnapshot},
    error::DomainError,
};

/// A single planned rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: LogicalPath,
    pub to: LogicalPath,
}

/// Precomputed list of renames, stored in application order.
///
/// Deeper entries move first, so every `from` still exists when its move
/// runs. Among siblings, an entry whose name another rename wants moves out
/// of the way first. Computing the plan never touches the index; applying it
/// is a separate step so the whole plan can be validated before the first
/// move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderPlan {
    renames: Vec<Rename>,
}

impl RenderPlan {
    /// Build from renames collected in top-down traversal order.
    pub fn from_top_down(mut renames: Vec<Rename>) -> Self {
        renames.reverse();
        renames.sort_by_key(|r| std::cmp::Reverse(r.from.depth()));

        let mut ordered = Vec::with_capacity(renames.len());
        let mut rest = renames;
        while !rest.is_empty() {
            // Renames only change the last segment, so only same-depth
            // entries can hold each other's targets.
            let depth = rest[0].from.depth();
            let split = rest
                .iter()
                .position(|r| r.from.depth() != depth)
                .unwrap_or(rest.len());
            let tail = rest.split_off(split);
            ordered.extend(vacate_first(rest));
            rest = tail;
        }

        Self { renames: ordered }
    }

    pub fn renames(&self) -> &[Rename] {
        &self.renames
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Reject plans where two renames share a target, or where a target is
    /// still occupied when its move runs: an existing entry that is not
    /// renamed away, or one caught in a rename cycle.
    pub fn validate(&self, snapshot: &TreeSnapshot) -> Result<(), DomainError> {
        let mut by_target: BTreeMap<&LogicalPath, Vec<&LogicalPath>> = BTreeMap::new();
        for rename in &self.renames {
            by_target.entry(&rename.to).or_default().push(&rename.from);
        }

        if let Some((target, sources)) = by_target.iter().find(|(_, sources)| sources.len() > 1) {
            return Err(DomainError::DuplicateTarget {
                target: target.to_string(),
                sources: sources.iter().rev().map(|s| s.to_string()).collect(),
            });
        }

        let mut occupied: HashSet<&LogicalPath> =
            snapshot.entries().iter().map(|e| &e.path).collect();
        for rename in &self.renames {
            if occupied.contains(&rename.to) {
                return Err(DomainError::DuplicateTarget {
                    target: rename.to.to_string(),
                    sources: vec![rename.from.to_string(), rename.to.to_string()],
                });
            }
            occupied.remove(&rename.from);
            occupied.insert(&rename.to);
        }

        Ok(())
    }
}

/// Order same-depth renames so a rename runs only after the one that frees
/// its target. Cycles keep their relative order; `validate` rejects them.
fn vacate_first(mut pending: Vec<Rename>) -> Vec<Rename> {
    let mut ordered = Vec::with_capacity(pending.len());
    while !pending.is_empty() {
        let ready = pending
            .iter()
            .position(|r| !pending.iter().any(|other| other.from == r.to))
            .unwrap_or(0);
        ordered.push(pending.remove(ready));
    }
    ordered
}
