//! Hand-written fakes shared by the service tests.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::{
    application::{
        ApplicationError,
        ports::{Repository, StagingIndex, TemplateRenderer, TemplateSource},
    },
    domain::{ConfigMapping, LogicalPath, TreeSnapshot},
    error::GittrResult,
};

/// Replaces `{{ key }}` / `{{ a.b }}` with mapping values; nothing else.
///
/// Unknown keys are left in place so tests can observe partial resolution.
pub struct Substitute;

impl TemplateRenderer for Substitute {
    fn render(&self, _name: &str, source: &str, mapping: &ConfigMapping) -> GittrResult<String> {
        let mut out = String::new();
        let mut rest = source;
        while let Some(start) = rest.find("{{") {
            let Some(end) = rest[start..].find("}}") else {
                break;
            };
            out.push_str(&rest[..start]);
            let key = rest[start + 2..start + end].trim();
            match mapping.get(key) {
                Some(Value::String(s)) => out.push_str(s),
                Some(other) => out.push_str(&other.to_string()),
                None => out.push_str(&rest[start..start + end + 2]),
            }
            rest = &rest[start + end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

pub struct MapSource(pub HashMap<String, String>);

impl MapSource {
    pub fn of(files: &[(&str, &str)]) -> Self {
        Self(
            files
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
        )
    }
}

impl TemplateSource for MapSource {
    fn load(&self, path: &LogicalPath) -> GittrResult<Option<String>> {
        Ok(self.0.get(path.as_str()).cloned())
    }
}

/// Staging index that only records calls.
#[derive(Debug, Default)]
pub struct RecordingIndex {
    pub calls: Vec<String>,
}

impl StagingIndex for RecordingIndex {
    fn add(&mut self, path: &LogicalPath) -> GittrResult<()> {
        self.calls.push(format!("add {path}"));
        Ok(())
    }

    fn remove(&mut self, path: &LogicalPath) -> GittrResult<()> {
        self.calls.push(format!("rm {path}"));
        Ok(())
    }

    fn move_entry(&mut self, from: &LogicalPath, to: &LogicalPath) -> GittrResult<()> {
        self.calls.push(format!("mv {from} {to}"));
        Ok(())
    }

    fn update(&mut self) -> GittrResult<()> {
        self.calls.push("update".into());
        Ok(())
    }
}

pub fn mapping(yaml: &str) -> ConfigMapping {
    ConfigMapping::from_yaml(yaml).unwrap()
}

type Files = BTreeMap<LogicalPath, String>;

/// Text-only repository: a working tree, named refs and an operation log.
///
/// `fetch(url, refspec, local)` copies the ref stored under `"{url}@{refspec}"`.
#[derive(Debug, Default)]
pub struct FakeRepository {
    pub files: Files,
    pub refs: HashMap<String, Files>,
    pub log: Vec<String>,
}

impl FakeRepository {
    pub fn with_head(files: &[(&str, &str)]) -> Self {
        let files: Files = files
            .iter()
            .map(|(p, c)| (LogicalPath::new(*p), c.to_string()))
            .collect();
        Self {
            refs: HashMap::from([("HEAD".to_string(), files.clone())]),
            files,
            log: Vec::new(),
        }
    }

    pub fn with_remote(mut self, locator: &str, files: &[(&str, &str)]) -> Self {
        self.refs.insert(
            locator.to_string(),
            files
                .iter()
                .map(|(p, c)| (LogicalPath::new(*p), c.to_string()))
                .collect(),
        );
        self
    }

    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(&LogicalPath::new(path)).map(String::as_str)
    }

    pub fn commits(&self) -> Vec<&str> {
        self.log
            .iter()
            .filter_map(|l| l.strip_prefix("commit "))
            .collect()
    }

    fn tree(&self, reference: &str) -> GittrResult<Files> {
        self.refs.get(reference).cloned().ok_or_else(|| {
            ApplicationError::VcsCommandFailed {
                command: format!("checkout {reference}"),
                reason: "unknown ref".into(),
            }
            .into()
        })
    }
}

impl TemplateSource for FakeRepository {
    fn load(&self, path: &LogicalPath) -> GittrResult<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}

impl StagingIndex for FakeRepository {
    fn add(&mut self, path: &LogicalPath) -> GittrResult<()> {
        self.log.push(format!("add {path}"));
        Ok(())
    }

    fn remove(&mut self, path: &LogicalPath) -> GittrResult<()> {
        self.files.remove(path);
        self.log.push(format!("rm {path}"));
        Ok(())
    }

    fn move_entry(&mut self, from: &LogicalPath, to: &LogicalPath) -> GittrResult<()> {
        self.files = std::mem::take(&mut self.files)
            .into_iter()
            .map(|(path, content)| (path.rebase(from, to).unwrap_or(path), content))
            .collect();
        self.log.push(format!("mv {from} {to}"));
        Ok(())
    }

    fn update(&mut self) -> GittrResult<()> {
        self.log.push("update".into());
        Ok(())
    }
}

impl Repository for FakeRepository {
    fn snapshot(&self) -> GittrResult<TreeSnapshot> {
        Ok(TreeSnapshot::from_blob_paths(self.files.keys().cloned()))
    }

    fn read_file(&self, path: &LogicalPath) -> GittrResult<Option<Vec<u8>>> {
        Ok(self.files.get(path).map(|c| c.clone().into_bytes()))
    }

    fn write_file(&mut self, path: &LogicalPath, content: &[u8]) -> GittrResult<()> {
        self.files
            .insert(path.clone(), String::from_utf8_lossy(content).into_owned());
        Ok(())
    }

    fn index(&mut self) -> &mut dyn StagingIndex {
        self
    }

    fn sources(&self) -> &dyn TemplateSource {
        self
    }

    fn fetch(&mut self, url: &str, refspec: &str, local_ref: &str) -> GittrResult<()> {
        let tree = self.tree(&format!("{url}@{refspec}"))?;
        self.refs.insert(local_ref.to_string(), tree);
        self.log.push(format!("fetch {url} {refspec}:{local_ref}"));
        Ok(())
    }

    fn checkout(&mut self, reference: &str, paths: &[LogicalPath]) -> GittrResult<()> {
        let tree = self.tree(reference)?;
        if paths.is_empty() {
            self.files.extend(tree);
        } else {
            for path in paths {
                if let Some(content) = tree.get(path) {
                    self.files.insert(path.clone(), content.clone());
                }
            }
        }
        self.log.push(format!("checkout {reference}"));
        Ok(())
    }

    fn switch_branch(&mut self, branch: &str) -> GittrResult<()> {
        self.files = self.tree(branch)?;
        self.log.push(format!("switch {branch}"));
        Ok(())
    }

    fn commit(&mut self, message: &str) -> GittrResult<()> {
        self.refs.insert("HEAD".to_string(), self.files.clone());
        self.log.push(format!("commit {message}"));
        Ok(())
    }
}
