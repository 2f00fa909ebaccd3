//! Tera-backed template renderer.

use std::collections::HashSet;
use std::error::Error as _;

use tera::{Context, Tera};
use tracing::trace;

use gittr_core::{
    application::{
        ApplicationError,
        ports::{PartialSource, TemplateRenderer},
    },
    domain::ConfigMapping,
    error::GittrResult,
};

use super::{
    clock::RenderClock,
    filters::{self, Now},
};

/// Internal name each one-off template is registered under.
const INLINE: &str = "__gittr_inline__";

/// Renders template strings with Tera.
///
/// - undefined variables are evaluation errors, never empty strings
/// - autoescaping is off; output is source code, not HTML
/// - `now()` reads the [`RenderClock`] given at construction
/// - `include`, `import` and `extends` resolve through a [`PartialSource`]
#[derive(Debug, Clone)]
pub struct TeraRenderer {
    tera: Tera,
    clock: RenderClock,
}

impl TeraRenderer {
    /// Renderer whose clock is the moment of construction.
    pub fn new() -> Self {
        Self::with_clock(RenderClock::system())
    }

    pub fn with_clock(clock: RenderClock) -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.register_filter("snake_case", filters::snake_case);
        tera.register_filter("pascal_case", filters::pascal_case);
        tera.register_filter("camel_case", filters::camel_case);
        tera.register_filter("kebab_case", filters::kebab_case);
        tera.register_function("now", Now::new(clock));

        Self { tera, clock }
    }

    pub fn clock(&self) -> RenderClock {
        self.clock
    }

    fn render_source(
        &self,
        name: &str,
        source: &str,
        mapping: &ConfigMapping,
        partials: &[(String, String)],
    ) -> GittrResult<String> {
        trace!(template = name, bytes = source.len(), partials = partials.len(), "tera render");

        // A cloned instance keeps the registered filters and functions.
        let mut inline = self.tera.clone();
        let templates = partials
            .iter()
            .map(|(n, t)| (n.as_str(), t.as_str()))
            .chain(std::iter::once((INLINE, source)));
        inline
            .add_raw_templates(templates)
            .map_err(|e| ApplicationError::TemplateSyntax {
                name: name.to_string(),
                message: describe(&e, name),
            })?;

        let context =
            Context::from_value(mapping.to_value()).map_err(|e| ApplicationError::TemplateEval {
                name: name.to_string(),
                message: describe(&e, name),
            })?;

        inline.render(INLINE, &context).map_err(|e| {
            ApplicationError::TemplateEval {
                name: name.to_string(),
                message: describe(&e, name),
            }
            .into()
        })
    }
}

impl Default for TeraRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, name: &str, source: &str, mapping: &ConfigMapping) -> GittrResult<String> {
        self.render_source(name, source, mapping, &[])
    }

    fn render_with_partials(
        &self,
        name: &str,
        source: &str,
        mapping: &ConfigMapping,
        partials: &dyn PartialSource,
    ) -> GittrResult<String> {
        let loaded = load_partials(source, partials)?;
        self.render_source(name, source, mapping, &loaded)
    }
}

/// Every template reachable from `source`, loaded once each.
///
/// Names the source cannot resolve are left out; Tera then reports them,
/// or skips them for `ignore missing`.
fn load_partials(
    source: &str,
    partials: &dyn PartialSource,
) -> GittrResult<Vec<(String, String)>> {
    let mut loaded = Vec::new();
    let mut seen = HashSet::new();
    let mut pending = references(source);

    while let Some(name) = pending.pop() {
        if !seen.insert(name.clone()) {
            continue;
        }
        if let Some(text) = partials.partial(&name)? {
            pending.extend(references(&text));
            loaded.push((name, text));
        }
    }
    Ok(loaded)
}

/// Names pulled in by `include`, `import` and `extends` tags.
///
/// Comments and `raw` blocks are skipped.
fn references(source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_raw = false;
    let mut rest = source;

    loop {
        let (open, close) = match (rest.find("{%"), rest.find("{#")) {
            (Some(tag), Some(comment)) if comment < tag => (comment, "#}"),
            (Some(tag), _) => (tag, "%}"),
            (None, Some(comment)) => (comment, "#}"),
            (None, None) => break,
        };
        let start = open + 2;
        let Some(len) = rest[start..].find(close) else {
            break;
        };
        let body = &rest[start..start + len];
        rest = &rest[start + len + 2..];
        if close == "#}" {
            continue;
        }

        let body = body.trim_matches('-').trim();
        let keyword = body.split_whitespace().next().unwrap_or_default();
        match keyword {
            "raw" => in_raw = true,
            "endraw" => in_raw = false,
            "include" | "import" | "extends" if !in_raw => {
                names.extend(string_literals(&body[keyword.len()..]));
            }
            _ => {}
        }
    }
    names
}

fn string_literals(text: &str) -> Vec<String> {
    let mut literals = Vec::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if matches!(c, '"' | '\'' | '`') {
            literals.push(chars.by_ref().take_while(|&q| q != c).collect());
        }
    }
    literals
}

/// Flatten a Tera error chain, naming the template the way the caller did.
fn describe(err: &tera::Error, name: &str) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(e) = source {
        parts.push(e.to_string());
        source = e.source();
    }
    parts.join(": ").replace(INLINE, name)
}
