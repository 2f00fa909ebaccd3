//! Template Engine - the path-guarded front of the template language.
//!
//! Wraps a [`TemplateRenderer`] port with the [`PathGuard`] so that every
//! by-name load, including a template pulled in from another one, is checked
//! before any text is read.

use tracing::{debug, trace};

use crate::{
    application::{
        ApplicationError, NotFoundReason,
        ports::{PartialSource, TemplateRenderer, TemplateSource},
    },
    domain::{ConfigMapping, LogicalPath, PathGuard},
    error::GittrResult,
};

/// Label used in error messages for anonymous template strings.
const INLINE_TEMPLATE: &str = "<inline>";

/// Guarded template evaluation.
pub struct TemplateEngine {
    renderer: Box<dyn TemplateRenderer>,
    guard: PathGuard,
}

impl TemplateEngine {
    /// Create an engine with the default path guard.
    pub fn new(renderer: Box<dyn TemplateRenderer>) -> Self {
        Self {
            renderer,
            guard: PathGuard::default(),
        }
    }

    pub fn with_guard(mut self, guard: PathGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Render an anonymous template string.
    pub fn render(&self, source: &str, mapping: &ConfigMapping) -> GittrResult<String> {
        self.render_labeled(INLINE_TEMPLATE, source, mapping)
    }

    /// Render a template string, naming it `label` in any error.
    pub fn render_labeled(
        &self,
        label: &str,
        source: &str,
        mapping: &ConfigMapping,
    ) -> GittrResult<String> {
        trace!(template = label, "rendering");
        self.renderer.render(label, source, mapping)
    }

    /// Load `path` through `sources` and render it.
    ///
    /// Templates it includes, imports or extends are loaded through the same
    /// guard and `sources`. A guard rejection and a missing file are both
    /// [`ApplicationError::TemplateNotFound`], told apart by the reason.
    pub fn render_named(
        &self,
        path: &LogicalPath,
        sources: &dyn TemplateSource,
        mapping: &ConfigMapping,
    ) -> GittrResult<String> {
        self.check(path)?;

        let source = sources
            .load(path)?
            .ok_or_else(|| ApplicationError::TemplateNotFound {
                path: path.to_string(),
                reason: NotFoundReason::Missing,
            })?;

        trace!(template = %path, "rendering");
        let partials = GuardedPartials {
            engine: self,
            sources,
        };
        self.renderer
            .render_with_partials(path.as_str(), &source, mapping, &partials)
    }

    fn check(&self, path: &LogicalPath) -> GittrResult<()> {
        self.guard.assert_eligible(path).map_err(|e| {
            debug!(path = %path, error = %e, "template load refused");
            ApplicationError::TemplateNotFound {
                path: path.to_string(),
                reason: NotFoundReason::Restricted,
            }
            .into()
        })
    }
}

/// Partial lookups for one `render_named` call.
struct GuardedPartials<'a> {
    engine: &'a TemplateEngine,
    sources: &'a dyn TemplateSource,
}

impl PartialSource for GuardedPartials<'_> {
    fn partial(&self, name: &str) -> GittrResult<Option<String>> {
        // A name that cannot be a tree path (absolute, `..`) points outside
        // the working tree.
        let path = LogicalPath::try_new(name).map_err(|_| ApplicationError::TemplateNotFound {
            path: name.to_string(),
            reason: NotFoundReason::Restricted,
        })?;
        self.engine.check(&path)?;
        self.sources.load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GittrError;
    use mockall::{mock, predicate::eq};
    use std::collections::HashMap;

    mock! {
        pub Renderer {}
        impl TemplateRenderer for Renderer {
            fn render(&self, name: &str, source: &str, mapping: &ConfigMapping) -> GittrResult<String>;
        }
    }

    struct MapSource(HashMap<String, String>);

    impl TemplateSource for MapSource {
        fn load(&self, path: &LogicalPath) -> GittrResult<Option<String>> {
            Ok(self.0.get(path.as_str()).cloned())
        }
    }

    fn sources() -> MapSource {
        MapSource(HashMap::from([
            ("README.md".to_string(), "Hello {{ name }}".to_string()),
            (".github/ght.yaml".to_string(), "name: x".to_string()),
            (".git/config".to_string(), "[core]".to_string()),
        ]))
    }

    fn not_found_reason(err: &GittrError) -> Option<NotFoundReason> {
        match err {
            GittrError::Application(ApplicationError::TemplateNotFound { reason, .. }) => {
                Some(*reason)
            }
            _ => None,
        }
    }

    #[test]
    fn render_named_passes_path_as_label() {
        let mut renderer = MockRenderer::new();
        renderer
            .expect_render()
            .with(eq("README.md"), eq("Hello {{ name }}"), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _| Ok("Hello AB".into()));

        let engine = TemplateEngine::new(Box::new(renderer));
        let out = engine
            .render_named(&LogicalPath::new("README.md"), &sources(), &ConfigMapping::new())
            .unwrap();
        assert_eq!(out, "Hello AB");
    }

    #[test]
    fn restricted_paths_never_reach_the_renderer() {
        let mut renderer = MockRenderer::new();
        renderer.expect_render().never();
        let engine = TemplateEngine::new(Box::new(renderer));

        for path in [".git/config", ".github/ght.yaml"] {
            let err = engine
                .render_named(&LogicalPath::new(path), &sources(), &ConfigMapping::new())
                .unwrap_err();
            assert_eq!(not_found_reason(&err), Some(NotFoundReason::Restricted), "{path}");
        }
    }

    #[test]
    fn missing_file_is_distinguishable_from_restricted() {
        let mut renderer = MockRenderer::new();
        renderer.expect_render().never();
        let engine = TemplateEngine::new(Box::new(renderer));

        let err = engine
            .render_named(&LogicalPath::new("absent.txt"), &sources(), &ConfigMapping::new())
            .unwrap_err();
        assert_eq!(not_found_reason(&err), Some(NotFoundReason::Missing));
    }

    /// Resolves every partial the source names (one per line) and joins them.
    struct JoinPartials;

    impl TemplateRenderer for JoinPartials {
        fn render(&self, _: &str, source: &str, _: &ConfigMapping) -> GittrResult<String> {
            Ok(source.to_string())
        }

        fn render_with_partials(
            &self,
            _: &str,
            source: &str,
            _: &ConfigMapping,
            partials: &dyn PartialSource,
        ) -> GittrResult<String> {
            let mut out = Vec::new();
            for name in source.lines() {
                out.push(partials.partial(name)?.unwrap_or_else(|| "<none>".into()));
            }
            Ok(out.join("|"))
        }
    }

    fn partials_source() -> MapSource {
        MapSource(HashMap::from([
            ("README.md".to_string(), ".github/header.j2\nabsent.txt".to_string()),
            (".github/header.j2".to_string(), "# Header".to_string()),
            ("escape.md".to_string(), "../outside".to_string()),
            ("config.md".to_string(), ".github/ght.yaml".to_string()),
        ]))
    }

    #[test]
    fn partials_are_loaded_through_the_guard() {
        let engine = TemplateEngine::new(Box::new(JoinPartials));
        let sources = partials_source();

        let out = engine
            .render_named(&LogicalPath::new("README.md"), &sources, &ConfigMapping::new())
            .unwrap();
        assert_eq!(out, "# Header|<none>");

        for path in ["escape.md", "config.md"] {
            let err = engine
                .render_named(&LogicalPath::new(path), &sources, &ConfigMapping::new())
                .unwrap_err();
            assert_eq!(not_found_reason(&err), Some(NotFoundReason::Restricted), "{path}");
        }
    }

    #[test]
    fn renderer_errors_propagate() {
        let mut renderer = MockRenderer::new();
        renderer.expect_render().returning(|name, _, _| {
            Err(ApplicationError::TemplateEval {
                name: name.to_string(),
                message: "Variable `nope` not found".into(),
            }
            .into())
        });
        let engine = TemplateEngine::new(Box::new(renderer));

        let err = engine.render("{{ nope }}", &ConfigMapping::new()).unwrap_err();
        assert!(matches!(
            err,
            GittrError::Application(ApplicationError::TemplateEval { ref name, .. }) if name == "<inline>"
        ));
    }
}
