//! Option validation and the transform error type.
//!
//! Validation runs once per transform session, before any file is touched.
//! Every failure here is fatal: there are no partial transforms.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::Serialize;
use std::fmt;
use std::fs;

use crate::options::{ExtendDocsOptions, RenameRule};

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";

/// Fatal transform failure. `code` is machine-readable, `message` names the
/// offending value.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "napi", napi(object))]
pub struct TransformError {
    pub code: String,
    pub message: String,
}

impl TransformError {
    pub fn config(message: impl Into<String>) -> Self {
        TransformError {
            code: CONFIG_ERROR.to_string(),
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        TransformError {
            code: PARSE_ERROR.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for TransformError {}

const TAG_EXAMPLE: &str = "Should be example:\n  {\n    from: 'my-counter',\n    to: 'my-extension',\n    paths: [{ from: './my-counter.js', to: './my-extension/my-extension.js' }],\n  }";

const VARIABLE_EXAMPLE: &str = "Should be example:\n  {\n    from: 'MyCounter',\n    to: 'MyExtension',\n    paths: [{ from: './index.js', to: './my-extension/index.js' }],\n  }";

fn given_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unserializable>".to_string())
}

/// Checks the options' shape. Expects [`ExtendDocsOptions::normalize`] to
/// have run, so legacy-shaped rules are already folded into `paths`.
pub fn validate_options(options: &ExtendDocsOptions) -> Result<(), TransformError> {
    // An explicit filePath bypasses the root checks (unit-style invocation).
    if options.file_path.is_none() {
        let root_path = options.root_path.as_deref().ok_or_else(|| {
            TransformError::config("extend-docs: You need to provide a rootPath option (string)")
        })?;
        let metadata = fs::metadata(root_path).map_err(|_| {
            TransformError::config(format!(
                "extend-docs: The provided rootPath \"{root_path}\" does not exist."
            ))
        })?;
        if !metadata.is_dir() {
            return Err(TransformError::config(format!(
                "extend-docs: The provided rootPath \"{root_path}\" is not a directory."
            )));
        }
    }

    if options.changes.is_empty() {
        return Err(TransformError::config(format!(
            "extend-docs: The required changes array is missing.\nGiven: {}\n{TAG_EXAMPLE}",
            given_json(&options.changes)
        )));
    }

    for change in &options.changes {
        if let Some(tag) = &change.tag {
            validate_rule(
                tag,
                "extend-docs: The provided tag change is not valid.",
                TAG_EXAMPLE,
            )?;
        }
        if let Some(variable) = &change.variable {
            validate_rule(
                variable,
                "extend-docs: The provided variable change is not valid.",
                VARIABLE_EXAMPLE,
            )?;
        }
    }

    Ok(())
}

fn validate_rule(rule: &RenameRule, intro: &str, example: &str) -> Result<(), TransformError> {
    let given = given_json(rule);

    if rule.from.is_empty() || rule.to.is_empty() {
        return Err(TransformError::config(format!(
            "{intro}\nGiven: {given}\n{example}"
        )));
    }

    if rule.paths.is_empty() {
        return Err(TransformError::config(format!(
            "{intro}\nThe paths array is missing.\nGiven: {given}\n{example}"
        )));
    }

    for mapping in &rule.paths {
        if mapping.from.is_empty() || mapping.to.is_empty() {
            return Err(TransformError::config(format!(
                "{intro}\nThe path object is invalid.\nGiven: {given}\n{example}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Change, PathMapping};
    use serde_json::json;

    fn options_from(value: serde_json::Value) -> ExtendDocsOptions {
        let mut options: ExtendDocsOptions = serde_json::from_value(value).unwrap();
        options.normalize();
        options
    }

    fn valid_tag() -> RenameRule {
        RenameRule {
            from: "my-counter".to_string(),
            to: "my-extension".to_string(),
            paths: vec![PathMapping {
                from: "./my-counter.js".to_string(),
                to: "./my-extension/my-extension.js".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_root_path() {
        let options = options_from(json!({ "changes": [{ "tag": {} }] }));
        let err = validate_options(&options).unwrap_err();
        assert_eq!(err.code, CONFIG_ERROR);
        assert_eq!(
            err.message,
            "extend-docs: You need to provide a rootPath option (string)"
        );
    }

    #[test]
    fn test_root_path_does_not_exist() {
        let options = options_from(json!({ "rootPath": "something", "changes": [] }));
        let err = validate_options(&options).unwrap_err();
        assert_eq!(
            err.message,
            "extend-docs: The provided rootPath \"something\" does not exist."
        );
    }

    #[test]
    fn test_root_path_not_a_directory() {
        let file = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
        let options = options_from(json!({ "rootPath": file, "changes": [] }));
        let err = validate_options(&options).unwrap_err();
        assert_eq!(
            err.message,
            format!("extend-docs: The provided rootPath \"{file}\" is not a directory.")
        );
    }

    #[test]
    fn test_missing_changes() {
        let options = options_from(json!({ "filePath": "/README.md" }));
        let err = validate_options(&options).unwrap_err();
        assert!(err
            .message
            .starts_with("extend-docs: The required changes array is missing."));
        assert!(err.message.contains("Given: []"));
    }

    #[test]
    fn test_invalid_tag_shapes() {
        let invalid = [
            json!({}),
            json!({ "from": "" }),
            json!({ "from": "my-counter" }),
            json!({ "from": "my-counter", "to": "" }),
        ];
        for tag in invalid {
            let options = options_from(json!({
                "filePath": "/README.md",
                "changes": [{ "tag": tag }]
            }));
            let err = validate_options(&options).unwrap_err();
            assert!(
                err.message
                    .starts_with("extend-docs: The provided tag change is not valid."),
                "unexpected message: {}",
                err.message
            );
            assert!(err.message.contains("Given: "));
        }
    }

    #[test]
    fn test_missing_paths_array() {
        for tag in [
            json!({ "from": "my-counter", "to": "my-extension" }),
            json!({ "from": "my-counter", "to": "my-extension", "paths": [] }),
        ] {
            let options = options_from(json!({
                "filePath": "/README.md",
                "changes": [{ "tag": tag }]
            }));
            let err = validate_options(&options).unwrap_err();
            assert!(err.message.contains("The paths array is missing."));
        }
    }

    #[test]
    fn test_invalid_path_object() {
        for paths in [
            json!([{}]),
            json!([{ "from": "" }]),
            json!([{ "from": "./index.js" }]),
            json!([{ "to": "./index.js" }]),
            json!([{ "from": "./index.js", "to": "" }]),
            json!([{ "from": "", "to": "./index.js" }]),
        ] {
            let options = options_from(json!({
                "filePath": "/README.md",
                "changes": [{ "variable": {
                    "from": "MyCounter", "to": "MyExtension", "paths": paths
                } }]
            }));
            let err = validate_options(&options).unwrap_err();
            assert!(
                err.message.contains("The path object is invalid."),
                "unexpected message: {}",
                err.message
            );
            assert!(err.message.contains("MyExtension"));
        }
    }

    #[test]
    fn test_variable_rule_checked_like_tag_rule() {
        let options = ExtendDocsOptions {
            file_path: Some("/README.md".to_string()),
            changes: vec![Change {
                variable: Some(RenameRule {
                    from: "MyCounter".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let err = validate_options(&options).unwrap_err();
        assert!(err
            .message
            .starts_with("extend-docs: The provided variable change is not valid."));
    }

    #[test]
    fn test_valid_options_pass() {
        let options = ExtendDocsOptions {
            file_path: Some("/README.md".to_string()),
            changes: vec![Change {
                name: Some("MyCounter".to_string()),
                tag: Some(valid_tag()),
                variable: None,
            }],
            ..Default::default()
        };
        assert!(validate_options(&options).is_ok());
    }
}
