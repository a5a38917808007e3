//! Configuration types for the extend-docs transform.
//!
//! The options object is JSON-shaped and arrives either from a JS build
//! pipeline through the napi boundary or directly from Rust callers. All
//! wire types are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Top-level transform options.
///
/// `file_path` is the logical path override used by unit-style invocations;
/// when it is absent the per-file logical path is derived by stripping
/// `root_path` off the host-supplied filename.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendDocsOptions {
    pub root_path: Option<String>,
    pub file_path: Option<String>,
    pub changes: Vec<Change>,
}

/// One logical rename. A single change (e.g. "Counter becomes Extension")
/// may carry a variable rule, a tag rule, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Change {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<RenameRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<RenameRule>,
}

/// Renames `from` to `to` whenever the import source matches one of the
/// `paths` mappings. For a variable rule `from`/`to` are symbol names; for
/// a tag rule they are custom-element tag names.
///
/// The legacy flat shape (`fromPaths` + `toPath`) is still accepted on the
/// wire and folded into `paths` by [`ExtendDocsOptions::normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
    pub paths: Vec<PathMapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub from_paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_path: Option<String>,
}

/// A source-path pattern and the module path renamed imports resolve to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathMapping {
    pub from: String,
    pub to: String,
}

impl ExtendDocsOptions {
    /// Folds any legacy-shaped rules into the structured `paths` form.
    /// Runs once, before validation.
    pub fn normalize(&mut self) {
        for change in &mut self.changes {
            if let Some(rule) = change.variable.as_mut() {
                rule.normalize();
            }
            if let Some(rule) = change.tag.as_mut() {
                rule.normalize();
            }
        }
    }
}

impl RenameRule {
    fn normalize(&mut self) {
        // Structured paths win when both shapes are present.
        if self.paths.is_empty() {
            if let Some(to_path) = self.to_path.take() {
                self.paths = self
                    .from_paths
                    .drain(..)
                    .map(|from| PathMapping {
                        from,
                        to: to_path.clone(),
                    })
                    .collect();
            }
        }
        self.from_paths.clear();
        self.to_path = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_legacy_shape() {
        let mut options: ExtendDocsOptions = serde_json::from_value(json!({
            "filePath": "/README.md",
            "changes": [{
                "variable": {
                    "from": "MyCounter",
                    "to": "MyExtension",
                    "fromPaths": ["index.js", "src/MyCounter.js"],
                    "toPath": "./my-extension/index.js"
                }
            }]
        }))
        .unwrap();

        options.normalize();
        let rule = options.changes[0].variable.as_ref().unwrap();
        assert_eq!(rule.paths.len(), 2);
        assert_eq!(rule.paths[0].from, "index.js");
        assert_eq!(rule.paths[0].to, "./my-extension/index.js");
        assert_eq!(rule.paths[1].from, "src/MyCounter.js");
        assert!(rule.from_paths.is_empty());
        assert!(rule.to_path.is_none());
    }

    #[test]
    fn test_normalize_prefers_structured_paths() {
        let mut rule: RenameRule = serde_json::from_value(json!({
            "from": "lion-input",
            "to": "wolf-input",
            "paths": [{ "from": "lion-input.js", "to": "wolf-input.js" }],
            "fromPaths": ["stale.js"],
            "toPath": "stale-target.js"
        }))
        .unwrap();

        rule.normalize();
        assert_eq!(rule.paths.len(), 1);
        assert_eq!(rule.paths[0].to, "wolf-input.js");
    }
}
