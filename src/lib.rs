//! # extend-docs native core
//!
//! Source-to-source rewriter for ECMAScript-module documentation files.
//! Given a set of rename rules, it retargets documentation written against
//! a base component library so it compiles and renders against an
//! extending library:
//!
//! 1. **Named imports** of renamed symbols are removed from their original
//!    statements and re-synthesized as grouped, depth-correct relative
//!    imports at the top of the file (`import { LionInput } from
//!    '@lion/input'` becomes `import { WolfInput } from
//!    '../../../index.js'`).
//! 2. **Bare side-effect imports** of custom-element definitions are
//!    retargeted in place.
//! 3. **Custom-element tags** inside `html` tagged template literals are
//!    rewritten textually, including closing tags and nested templates.
//!
//! The rewrite is byte-preserving: anything no rule matches is emitted
//! exactly as it was, and re-running the transform on its own output is a
//! no-op.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod options;
mod paths;
mod rewrite;
mod table;
mod templates;
mod transform;
mod validate;


pub use options::{Change, ExtendDocsOptions, PathMapping, RenameRule};
pub use table::{PathMatcher, RenameTable};
pub use transform::{extend_docs_internal, DocsTransform};
pub use validate::{validate_options, TransformError, CONFIG_ERROR, PARSE_ERROR};

#[cfg(feature = "napi")]
pub use transform::{extend_docs_native, validate_options_native};

#[cfg(feature = "napi")]
#[napi]
pub fn extend_docs_bridge() -> String {
    "extend-docs Native Bridge Connected".to_string()
}
