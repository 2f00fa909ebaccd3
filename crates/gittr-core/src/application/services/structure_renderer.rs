//! Tree Structure Renderer - renders file and directory names.
//!
//! Planning and application are separate steps. The plan is computed from an
//! immutable snapshot, validated as a whole, and only then applied move by
//! move, deepest entry first, so a directory rename never invalidates a path
//! that is still waiting to be moved.

use tracing::{debug, info, instrument};

use crate::{
    application::{ports::StagingIndex, services::TemplateEngine},
    domain::{ConfigMapping, DomainValidator, Rename, RenderPlan, TreeSnapshot},
    error::GittrResult,
};

pub struct TreeStructureRenderer<'a> {
    engine: &'a TemplateEngine,
}

impl<'a> TreeStructureRenderer<'a> {
    pub fn new(engine: &'a TemplateEngine) -> Self {
        Self { engine }
    }

    /// Compute the renames for every entry whose rendered name differs.
    ///
    /// The scoped template suffix is stripped before rendering. Entries whose
    /// name does not change are left out, so they never reach the index.
    pub fn plan(&self, snapshot: &TreeSnapshot, mapping: &ConfigMapping) -> GittrResult<RenderPlan> {
        let suffix = self.engine.guard().template_suffix();
        let mut renames = Vec::new();

        for entry in snapshot.entries() {
            let name = entry.name();
            let stripped = name.strip_suffix(suffix).unwrap_or(name);
            let rendered = self
                .engine
                .render_labeled(entry.path.as_str(), stripped, mapping)?;

            if rendered == name {
                continue;
            }

            DomainValidator::validate_rendered_name(&entry.path, &rendered)?;
            let to = entry.path.with_name(&rendered)?;
            debug!(from = %entry.path, to = %to, "planned rename");
            renames.push(Rename {
                from: entry.path.clone(),
                to,
            });
        }

        Ok(RenderPlan::from_top_down(renames))
    }

    /// Apply a validated plan, flushing the index after every move.
    pub fn apply(&self, plan: &RenderPlan, index: &mut dyn StagingIndex) -> GittrResult<()> {
        for rename in plan.renames() {
            index.move_entry(&rename.from, &rename.to)?;
            index.update()?;
        }
        Ok(())
    }

    /// Plan, validate and apply in one go.
    #[instrument(skip_all, fields(entries = snapshot.len()))]
    pub fn rename_all(
        &self,
        snapshot: &TreeSnapshot,
        mapping: &ConfigMapping,
        index: &mut dyn StagingIndex,
    ) -> GittrResult<RenderPlan> {
        let plan = self.plan(snapshot, mapping)?;
        DomainValidator::validate_render_plan(&plan, snapshot)?;
        self.apply(&plan, index)?;

        info!(renames = plan.len(), "structure pass complete");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::{RecordingIndex, Substitute, mapping};
    use crate::domain::{DomainError, LogicalPath};
    use crate::error::GittrError;

    fn snapshot(paths: &[&str]) -> TreeSnapshot {
        TreeSnapshot::from_blob_paths(paths.iter().map(|p| LogicalPath::new(*p)))
    }

    fn engine() -> TemplateEngine {
        TemplateEngine::new(Box::new(Substitute))
    }

    #[test]
    fn deepest_entries_move_first() {
        let engine = engine();
        let renderer = TreeStructureRenderer::new(&engine);
        let snap = snapshot(&["{{ a }}.ght/{{ b }}.ght"]);
        let mut index = RecordingIndex::default();

        renderer
            .rename_all(&snap, &mapping("a: x\nb: y"), &mut index)
            .unwrap();

        assert_eq!(
            index.calls,
            vec![
                "mv {{ a }}.ght/{{ b }}.ght {{ a }}.ght/y",
                "update",
                "mv {{ a }}.ght x",
                "update",
            ]
        );
    }

    #[test]
    fn unchanged_names_are_not_planned() {
        let engine = engine();
        let renderer = TreeStructureRenderer::new(&engine);
        let snap = snapshot(&["README.md", "src/main.rs", "{{ name }}.txt.ght"]);

        let plan = renderer.plan(&snap, &mapping("name: AB")).unwrap();
        assert_eq!(
            plan.renames(),
            &[Rename {
                from: LogicalPath::new("{{ name }}.txt.ght"),
                to: LogicalPath::new("AB.txt"),
            }]
        );
    }

    #[test]
    fn suffix_alone_is_stripped() {
        let engine = engine();
        let renderer = TreeStructureRenderer::new(&engine);
        let plan = renderer
            .plan(&snapshot(&["src/lib.rs.ght"]), &ConfigMapping::new())
            .unwrap();
        assert_eq!(plan.renames()[0].to.as_str(), "src/lib.rs");
    }

    #[test]
    fn duplicate_targets_fail_before_any_move() {
        let engine = engine();
        let renderer = TreeStructureRenderer::new(&engine);
        let snap = snapshot(&["{{ first }}", "{{ second }}"]);
        let mut index = RecordingIndex::default();

        let err = renderer
            .rename_all(&snap, &mapping("first: out\nsecond: out"), &mut index)
            .unwrap_err();

        assert!(matches!(
            err,
            GittrError::Domain(DomainError::DuplicateTarget { ref target, .. }) if target == "out"
        ));
        assert!(index.calls.is_empty());
    }

    #[test]
    fn separator_in_rendered_name_is_rejected() {
        let engine = engine();
        let renderer = TreeStructureRenderer::new(&engine);
        let err = renderer
            .plan(&snapshot(&["{{ name }}"]), &mapping("name: a/b"))
            .unwrap_err();
        assert!(matches!(
            err,
            GittrError::Domain(DomainError::InvalidRenderedName { .. })
        ));
    }
}
