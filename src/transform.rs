//! The transform session: validates options once, then rewrites files.
//!
//! Per file the flow is parse -> walk -> flush: oxc parses the module, a
//! `VisitMut` visitor classifies import declarations and rewrites template
//! chunks while collecting span edits, and at file-exit the pending imports
//! are synthesized and prepended. Edits are applied to the original source
//! text in reverse span order, so everything the rewrite does not touch is
//! emitted byte-for-byte.

#[cfg(feature = "napi")]
use napi_derive::napi;

use oxc_allocator::Allocator;
use oxc_ast::ast::{ImportDeclaration, TaggedTemplateExpression};
use oxc_ast_visit::{walk_mut, VisitMut};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::options::ExtendDocsOptions;
use crate::rewrite::{self, FileContext};
use crate::table::RenameTable;
use crate::templates;
use crate::validate::{validate_options, TransformError};

/// A validated transform session. The rename table is built once and is
/// read-only afterwards, so one session can process any number of files.
#[derive(Debug)]
pub struct DocsTransform {
    options: ExtendDocsOptions,
    table: RenameTable,
}

impl DocsTransform {
    /// Normalizes and validates the options and compiles the rename table.
    /// Any configuration problem fails here, before a file is touched.
    pub fn new(mut options: ExtendDocsOptions) -> Result<Self, TransformError> {
        options.normalize();
        validate_options(&options)?;
        let table = RenameTable::build(&options)?;
        Ok(DocsTransform { options, table })
    }

    /// Rewrites one file's source, returning the new source text.
    pub fn transform(&self, source: &str, filename: &str) -> Result<String, TransformError> {
        let logical_path = self.logical_path(filename);

        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true);
        let ret = Parser::new(&allocator, source, source_type).parse();
        if ret.panicked || !ret.errors.is_empty() {
            let detail = ret
                .errors
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "parser panicked".to_string());
            return Err(TransformError::parse(format!(
                "extend-docs: Failed to parse {filename}: {detail}"
            )));
        }
        let mut program = ret.program;

        let mut visitor = RewriteVisitor {
            ctx: FileContext::new(source, &logical_path),
            table: &self.table,
        };
        visitor.visit_program(&mut program);
        let FileContext {
            mut edits, pending, ..
        } = visitor.ctx;

        // Apply in reverse span order so earlier offsets stay valid.
        let min_edit_start = edits.iter().map(|(start, _, _)| *start as usize).min();
        edits.sort_by(|a, b| b.0.cmp(&a.0));
        let mut result = source.to_string();
        for (start, end, replacement) in edits {
            result.replace_range(start as usize..end as usize, &replacement);
        }

        if !pending.is_empty() {
            // Synthesized imports land at the top of the body, after a
            // hashbang when one exists. Nothing before that offset is ever
            // edited, so the source offset is still valid in `result`.
            let mut insert_at = match &program.hashbang {
                Some(hashbang) => {
                    let end = hashbang.span.end as usize;
                    source[end..]
                        .find('\n')
                        .map(|i| end + i + 1)
                        .unwrap_or(source.len())
                }
                None => 0,
            };
            // Never insert past the first edit; offsets before it are the
            // only ones guaranteed unchanged in `result`.
            if let Some(min_start) = min_edit_start {
                insert_at = insert_at.min(min_start);
            }
            result.insert_str(insert_at, &pending.flush());
        }

        Ok(result)
    }

    /// The file's location relative to the declared root, used purely for
    /// relative-import depth.
    fn logical_path(&self, filename: &str) -> String {
        if let Some(file_path) = &self.options.file_path {
            file_path.clone()
        } else if let Some(root_path) = &self.options.root_path {
            filename.replacen(root_path.as_str(), "", 1)
        } else {
            filename.to_string()
        }
    }
}

struct RewriteVisitor<'s, 't> {
    ctx: FileContext<'s>,
    table: &'t RenameTable,
}

impl<'a> VisitMut<'a> for RewriteVisitor<'_, '_> {
    fn visit_import_declaration(&mut self, decl: &mut ImportDeclaration<'a>) {
        rewrite::rewrite_import(&mut self.ctx, self.table, decl);
    }

    fn visit_tagged_template_expression(&mut self, expr: &mut TaggedTemplateExpression<'a>) {
        templates::rewrite_tagged_template(&mut self.ctx, self.table, expr);
        // Walk into the interpolations so nested templates are rewritten too.
        walk_mut::walk_tagged_template_expression(self, expr);
    }
}

/// One-shot convenience: validate, build the table and transform a single
/// file.
pub fn extend_docs_internal(
    source: &str,
    filename: &str,
    options: ExtendDocsOptions,
) -> Result<String, TransformError> {
    DocsTransform::new(options)?.transform(source, filename)
}

#[cfg(feature = "napi")]
#[napi]
pub fn extend_docs_native(
    code: String,
    filename: String,
    options: serde_json::Value,
) -> napi::Result<String> {
    let options: ExtendDocsOptions =
        serde_json::from_value(options).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    extend_docs_internal(&code, &filename, options).map_err(|e| napi::Error::from_reason(e.message))
}

#[cfg(feature = "napi")]
#[napi]
pub fn validate_options_native(options: serde_json::Value) -> napi::Result<()> {
    let mut options: ExtendDocsOptions =
        serde_json::from_value(options).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    options.normalize();
    validate_options(&options).map_err(|e| napi::Error::from_reason(e.message))
}
