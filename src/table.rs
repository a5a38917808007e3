//! The rename table: the read-only lookup structure a transform session
//! shares across every file it processes.

use regex::Regex;

use crate::options::{ExtendDocsOptions, PathMapping, RenameRule};
use crate::validate::TransformError;

/// Answers whether an import-source string falls under a configured path
/// pattern. Matching is a regex *search*, so plain patterns such as
/// `index.js` behave like substring checks against `./src/index.js`.
#[derive(Debug)]
pub struct PathMatcher {
    pattern: Regex,
}

impl PathMatcher {
    pub fn new(pattern: &str) -> Result<Self, TransformError> {
        let pattern = Regex::new(pattern).map_err(|e| {
            TransformError::config(format!(
                "extend-docs: The path pattern \"{pattern}\" is not a valid regular expression: {e}"
            ))
        })?;
        Ok(PathMatcher { pattern })
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}

/// One `paths` entry with its pattern compiled.
#[derive(Debug)]
pub struct PathRule {
    pub matcher: PathMatcher,
    pub to: String,
}

/// Renames an imported symbol when the import source matches.
#[derive(Debug)]
pub struct VariableRule {
    pub from: String,
    pub to: String,
    paths: Vec<PathRule>,
}

/// Renames a custom-element tag, both inside `html` templates and in the
/// source of bare side-effect imports.
#[derive(Debug)]
pub struct TagRule {
    pub from: String,
    pub to: String,
    /// Global-replacement pattern applied to template chunks.
    pub occurrence: Regex,
    paths: Vec<PathRule>,
}

impl VariableRule {
    /// First `paths` entry whose pattern matches wins; no match means the
    /// import stays untouched for this rule.
    pub fn resolve_target(&self, source: &str) -> Option<&str> {
        first_match(&self.paths, source)
    }
}

impl TagRule {
    pub fn resolve_target(&self, source: &str) -> Option<&str> {
        first_match(&self.paths, source)
    }
}

fn first_match<'a>(paths: &'a [PathRule], source: &str) -> Option<&'a str> {
    paths
        .iter()
        .find(|rule| rule.matcher.matches(source))
        .map(|rule| rule.to.as_str())
}

fn compile_paths(paths: &[PathMapping]) -> Result<Vec<PathRule>, TransformError> {
    paths
        .iter()
        .map(|mapping| {
            Ok(PathRule {
                matcher: PathMatcher::new(&mapping.from)?,
                to: mapping.to.clone(),
            })
        })
        .collect()
}

/// Built once from validated options and read-only afterwards.
#[derive(Debug, Default)]
pub struct RenameTable {
    variables: Vec<VariableRule>,
    tags: Vec<TagRule>,
}

impl RenameTable {
    /// Compiles every rule pattern up front. A pattern that does not
    /// compile fails the whole session before any file is processed.
    pub fn build(options: &ExtendDocsOptions) -> Result<Self, TransformError> {
        let mut table = RenameTable::default();
        for change in &options.changes {
            if let Some(rule) = &change.variable {
                table.variables.push(VariableRule {
                    from: rule.from.clone(),
                    to: rule.to.clone(),
                    paths: compile_paths(&rule.paths)?,
                });
            }
            if let Some(rule) = &change.tag {
                table.tags.push(TagRule {
                    from: rule.from.clone(),
                    to: rule.to.clone(),
                    occurrence: occurrence_pattern(rule)?,
                    paths: compile_paths(&rule.paths)?,
                });
            }
        }
        Ok(table)
    }

    /// Exact-equality lookup of an imported symbol name. The first declared
    /// rule wins when several share a name.
    pub fn lookup_variable(&self, name: &str) -> Option<&VariableRule> {
        self.variables.iter().find(|rule| rule.from == name)
    }

    /// Tag rules in declaration order.
    pub fn tag_rules(&self) -> &[TagRule] {
        &self.tags
    }
}

fn occurrence_pattern(rule: &RenameRule) -> Result<Regex, TransformError> {
    Regex::new(&rule.from).map_err(|e| {
        TransformError::config(format!(
            "extend-docs: The tag pattern \"{}\" is not a valid regular expression: {e}",
            rule.from
        ))
    })
}
