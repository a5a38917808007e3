//! Tag rewriting inside `html` tagged template literals.
//!
//! Replacement is deliberately textual: every occurrence of a configured
//! tag name inside a template's static chunks is substituted, which covers
//! opening tags, closing tags and attribute positions alike. Interpolations
//! are never touched; nested templates are handled by the traversal
//! visiting every tagged template independently.

use regex::NoExpand;
use std::borrow::Cow;

use oxc_ast::ast::{Expression, TaggedTemplateExpression};

use crate::rewrite::FileContext;
use crate::table::RenameTable;

/// The markup-template function name documentation templates are tagged
/// with. Only templates tagged exactly `html` are rewritten.
const TEMPLATE_TAG: &str = "html";

pub fn rewrite_tagged_template(
    ctx: &mut FileContext,
    table: &RenameTable,
    expr: &TaggedTemplateExpression,
) {
    let Expression::Identifier(tag) = &expr.tag else {
        return;
    };
    if tag.name != TEMPLATE_TAG {
        return;
    }

    for quasi in &expr.quasi.quasis {
        let raw = ctx.slice(quasi.span);
        let mut current = Cow::Borrowed(raw);
        for rule in table.tag_rules() {
            if rule.occurrence.is_match(&current) {
                let replaced = rule
                    .occurrence
                    .replace_all(&current, NoExpand(rule.to.as_str()))
                    .into_owned();
                current = Cow::Owned(replaced);
            }
        }
        if let Cow::Owned(rewritten) = current {
            ctx.edits.push((quasi.span.start, quasi.span.end, rewritten));
        }
    }
}
