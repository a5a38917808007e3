//! Import rewriting.
//!
//! Per file this runs as a two-state machine: while the host traversal is
//! scanning, every import declaration is classified and either edited in
//! place (bare side-effect imports), removed with its renamed specifiers
//! parked in [`PendingImports`], or left byte-for-byte untouched. At
//! file-exit the pending imports are flushed into synthesized declarations
//! that are prepended to the file.

use oxc_ast::ast::{
    ImportDeclaration, ImportDeclarationSpecifier, ImportSpecifier, ModuleExportName,
};
use oxc_span::Span;

use crate::paths::{folder_depth, join_relative, relative_prefix};
use crate::table::{RenameTable, VariableRule};

/// A renamed specifier waiting for synthesis. `local` is the binding name
/// the synthesized import exposes; it equals `imported` unless the author
/// chose an explicit alias, which is never clobbered.
#[derive(Debug, PartialEq)]
pub struct ChangedSpecifier {
    pub imported: String,
    pub local: String,
}

/// Specifiers split out of a partially-matched statement, preserved as
/// verbatim source slices. `head` carries default/namespace specifiers,
/// `named` the brace-list entries.
#[derive(Debug, Default)]
pub struct KeptGroup {
    pub head: Vec<String>,
    pub named: Vec<String>,
}

impl KeptGroup {
    fn is_empty(&self) -> bool {
        self.head.is_empty() && self.named.is_empty()
    }
}

/// The ordered multimap of imports collected during a single file's
/// traversal. Group order is first-seen; specifier order within a group is
/// insertion order.
#[derive(Debug, Default)]
pub struct PendingImports {
    /// Resolved target path -> renamed specifiers.
    changed: Vec<(String, Vec<ChangedSpecifier>)>,
    /// Original source literal (with quotes) -> surviving specifiers.
    kept: Vec<(String, KeptGroup)>,
}

impl PendingImports {
    pub fn push_changed(&mut self, target: String, specifier: ChangedSpecifier) {
        match self.changed.iter_mut().find(|(t, _)| *t == target) {
            Some((_, group)) => group.push(specifier),
            None => self.changed.push((target, vec![specifier])),
        }
    }

    pub fn push_kept(&mut self, source: String, group: KeptGroup) {
        match self.kept.iter_mut().find(|(s, _)| *s == source) {
            Some((_, existing)) => {
                existing.head.extend(group.head);
                existing.named.extend(group.named);
            }
            None => self.kept.push((source, group)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.kept.is_empty()
    }

    /// Synthesizes one import declaration per group: change-groups first in
    /// first-seen target order, then keep-groups per original source.
    pub fn flush(&self) -> String {
        let mut out = String::new();
        for (target, specifiers) in &self.changed {
            let list = specifiers
                .iter()
                .map(|s| {
                    if s.local == s.imported {
                        s.imported.clone()
                    } else {
                        format!("{} as {}", s.imported, s.local)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("import {{ {list} }} from '{target}';\n"));
        }
        for (source, group) in &self.kept {
            let mut clause = group.head.join(", ");
            if !group.named.is_empty() {
                if !clause.is_empty() {
                    clause.push_str(", ");
                }
                clause.push_str(&format!("{{ {} }}", group.named.join(", ")));
            }
            out.push_str(&format!("import {clause} from {source};\n"));
        }
        out
    }
}

/// Per-file mutable state, created at file-entry and consumed at file-exit.
/// `edits` are `(start, end, replacement)` spans against the original
/// source text.
#[derive(Debug)]
pub struct FileContext<'s> {
    pub source: &'s str,
    /// `../` repeated once per directory level of the logical path.
    pub import_prefix: String,
    pub pending: PendingImports,
    pub edits: Vec<(u32, u32, String)>,
}

impl<'s> FileContext<'s> {
    pub fn new(source: &'s str, logical_path: &str) -> Self {
        FileContext {
            source,
            import_prefix: relative_prefix(folder_depth(logical_path)),
            pending: PendingImports::default(),
            edits: Vec::new(),
        }
    }

    pub fn slice(&self, span: Span) -> &'s str {
        &self.source[span.start as usize..span.end as usize]
    }

    /// Removes a whole statement, also consuming its line's leading
    /// indentation and one trailing line break so no blank line is left.
    pub fn remove_statement(&mut self, span: Span) {
        let bytes = self.source.as_bytes();
        let mut start = span.start as usize;
        let mut line_start = start;
        while line_start > 0 && matches!(bytes[line_start - 1], b' ' | b'\t') {
            line_start -= 1;
        }
        if line_start == 0 || bytes[line_start - 1] == b'\n' {
            start = line_start;
        }
        let mut end = span.end as usize;
        if bytes.get(end) == Some(&b'\r') {
            end += 1;
        }
        if bytes.get(end) == Some(&b'\n') {
            end += 1;
        }
        self.edits.push((start as u32, end as u32, String::new()));
    }
}

/// Entry point for every import declaration the traversal encounters.
pub fn rewrite_import(ctx: &mut FileContext, table: &RenameTable, decl: &ImportDeclaration) {
    match &decl.specifiers {
        Some(specifiers) if !specifiers.is_empty() => {
            rewrite_named_import(ctx, table, decl, specifiers);
        }
        // `import './x.js';` and the degenerate `import {} from './x.js';`
        _ => rewrite_bare_import(ctx, table, decl),
    }
}

/// Bare side-effect imports load custom-element definitions; the first tag
/// rule whose path mapping matches retargets the source literal in place.
fn rewrite_bare_import(ctx: &mut FileContext, table: &RenameTable, decl: &ImportDeclaration) {
    let source_value = decl.source.value.as_str();
    for rule in table.tag_rules() {
        if let Some(to) = rule.resolve_target(source_value) {
            let target = join_relative(&ctx.import_prefix, to);
            let quote = quote_char(ctx.source, decl.source.span);
            ctx.edits.push((
                decl.source.span.start,
                decl.source.span.end,
                format!("{quote}{target}{quote}"),
            ));
            return;
        }
    }
}

fn rewrite_named_import(
    ctx: &mut FileContext,
    table: &RenameTable,
    decl: &ImportDeclaration,
    specifiers: &[ImportDeclarationSpecifier],
) {
    let source_value = decl.source.value.as_str();
    let mut changed: Vec<(String, ChangedSpecifier)> = Vec::new();
    let mut kept = KeptGroup::default();

    for specifier in specifiers {
        match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(s) => {
                match match_named(table, s, source_value) {
                    Some((rule, to)) => {
                        let local = s.local.name.as_str();
                        let alias = if local == rule.from {
                            rule.to.clone()
                        } else {
                            local.to_string()
                        };
                        changed.push((
                            join_relative(&ctx.import_prefix, to),
                            ChangedSpecifier {
                                imported: rule.to.clone(),
                                local: alias,
                            },
                        ));
                    }
                    None => kept.named.push(ctx.slice(s.span).to_string()),
                }
            }
            // Default and namespace specifiers are never rewritten.
            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                kept.head.push(ctx.slice(s.span).to_string());
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                kept.head.push(ctx.slice(s.span).to_string());
            }
        }
    }

    // Nothing matched (including the unresolved-rename case, where a name
    // matches but no path mapping does): leave the statement untouched.
    if changed.is_empty() {
        return;
    }

    ctx.remove_statement(decl.span);
    for (target, specifier) in changed {
        ctx.pending.push_changed(target, specifier);
    }
    if !kept.is_empty() {
        let source_text = ctx.slice(decl.source.span).to_string();
        ctx.pending.push_kept(source_text, kept);
    }
}

/// A named specifier is subject to rename when its imported name equals a
/// rule's `from` *and* the statement's source matches one of that rule's
/// path mappings.
fn match_named<'t>(
    table: &'t RenameTable,
    specifier: &ImportSpecifier,
    source_value: &str,
) -> Option<(&'t VariableRule, &'t str)> {
    let imported = match &specifier.imported {
        ModuleExportName::IdentifierName(id) => id.name.as_str(),
        _ => return None,
    };
    let rule = table.lookup_variable(imported)?;
    let to = rule.resolve_target(source_value)?;
    Some((rule, to))
}

fn quote_char(source: &str, literal_span: Span) -> char {
    match source.as_bytes().get(literal_span.start as usize) {
        Some(b'"') => '"',
        _ => '\'',
    }
}
