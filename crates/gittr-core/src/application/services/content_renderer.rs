//! Tree Content Renderer - renders every eligible file in place.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Repository, TemplateSource},
        services::TemplateEngine,
    },
    domain::{ConfigMapping, LogicalPath, TreeSnapshot},
    error::{GittrError, GittrResult},
};

/// What a content pass touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentReport {
    /// Paths that were rendered and staged, in snapshot order.
    pub rendered: Vec<LogicalPath>,
    /// How many of those came out byte-identical to their source.
    pub unchanged: usize,
}

impl ContentReport {
    pub fn changed(&self) -> usize {
        self.rendered.len() - self.unchanged
    }
}

/// Renders file contents across a whole tree.
///
/// The pass is all-or-nothing: every selected file is rendered before any is
/// written, so a failure leaves the working tree untouched.
pub struct TreeContentRenderer<'a> {
    engine: &'a TemplateEngine,
}

impl<'a> TreeContentRenderer<'a> {
    pub fn new(engine: &'a TemplateEngine) -> Self {
        Self { engine }
    }

    /// Blobs whose content is rendered: everything outside the metadata
    /// directory, plus `.ght` files inside it.
    pub fn select<'s>(&self, snapshot: &'s TreeSnapshot) -> Vec<&'s LogicalPath> {
        let guard = self.engine.guard();
        snapshot
            .blobs()
            .map(|entry| &entry.path)
            .filter(|path| guard.is_content_template(path))
            .collect()
    }

    /// Render every selected file and return `(path, output)` pairs.
    pub fn render_files(
        &self,
        snapshot: &TreeSnapshot,
        mapping: &ConfigMapping,
        sources: &dyn TemplateSource,
    ) -> GittrResult<Vec<(LogicalPath, String)>> {
        self.select(snapshot)
            .into_iter()
            .map(|path| {
                self.engine
                    .render_named(path, sources, mapping)
                    .map(|out| (path.clone(), out))
                    .map_err(|e| {
                        GittrError::from(ApplicationError::ContentRenderFailed {
                            path: path.to_string(),
                            source: Box::new(e),
                        })
                    })
            })
            .collect()
    }

    #[instrument(skip_all, fields(entries = snapshot.len()))]
    pub fn render_all(
        &self,
        snapshot: &TreeSnapshot,
        mapping: &ConfigMapping,
        repo: &mut dyn Repository,
    ) -> GittrResult<ContentReport> {
        let rendered = self.render_files(snapshot, mapping, repo.sources())?;

        let mut report = ContentReport::default();
        for (path, output) in rendered {
            let before = repo.read_file(&path)?;
            if before.as_deref() == Some(output.as_bytes()) {
                report.unchanged += 1;
            }
            repo.write_file(&path, output.as_bytes())?;
            repo.index().add(&path)?;
            debug!(path = %path, "content rendered");
            report.rendered.push(path);
        }

        info!(
            files = report.rendered.len(),
            changed = report.changed(),
            "content pass complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::TemplateRenderer;
    use crate::application::services::testing::MapSource;

    /// Upper-cases the source; fails on any text containing `boom`.
    struct Shout;

    impl TemplateRenderer for Shout {
        fn render(&self, name: &str, source: &str, _: &ConfigMapping) -> GittrResult<String> {
            if source.contains("boom") {
                return Err(ApplicationError::TemplateEval {
                    name: name.to_string(),
                    message: "boom".into(),
                }
                .into());
            }
            Ok(source.to_uppercase())
        }
    }

    fn snapshot(paths: &[&str]) -> TreeSnapshot {
        TreeSnapshot::from_blob_paths(paths.iter().map(|p| LogicalPath::new(*p)))
    }

    #[test]
    fn selects_content_outside_metadata_and_scoped_templates_inside() {
        let engine = TemplateEngine::new(Box::new(Shout));
        let renderer = TreeContentRenderer::new(&engine);
        let snap = snapshot(&[
            ".github/ght.yaml",
            ".github/workflows/ci.yml",
            ".github/workflows/ci.yml.ght",
            "README.md",
            "src/lib.rs.ght",
        ]);

        let selected: Vec<&str> = renderer.select(&snap).iter().map(|p| p.as_str()).collect();
        assert_eq!(
            selected,
            vec![".github/workflows/ci.yml.ght", "README.md", "src/lib.rs.ght"]
        );
    }

    #[test]
    fn first_failure_is_reported_with_its_path() {
        let engine = TemplateEngine::new(Box::new(Shout));
        let renderer = TreeContentRenderer::new(&engine);
        let sources = MapSource::of(&[("a.txt", "fine"), ("b.txt", "boom")]);

        let err = renderer
            .render_files(&snapshot(&["a.txt", "b.txt"]), &ConfigMapping::new(), &sources)
            .unwrap_err();

        match err {
            GittrError::Application(ApplicationError::ContentRenderFailed { path, .. }) => {
                assert_eq!(path, "b.txt")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn renders_every_selected_file() {
        let engine = TemplateEngine::new(Box::new(Shout));
        let renderer = TreeContentRenderer::new(&engine);
        let sources = MapSource::of(&[("a.txt", "one"), ("d/b.txt", "two")]);

        let out = renderer
            .render_files(&snapshot(&["a.txt", "d/b.txt"]), &ConfigMapping::new(), &sources)
            .unwrap();
        assert_eq!(
            out,
            vec![
                (LogicalPath::new("a.txt"), "ONE".to_string()),
                (LogicalPath::new("d/b.txt"), "TWO".to_string()),
            ]
        );
    }
}
