//! Relative-path arithmetic for synthesized import sources.
//!
//! A file's logical path is its location relative to the configured root,
//! written absolute-style (`/node_module/@lion/input/README.md`). Rewritten
//! imports climb back to the root with one `../` per directory level.

/// Number of directory levels a logical path sits below the root.
///
/// Counts path separators minus one: the leading separator of an
/// absolute-style path does not count as a directory level. A path with no
/// separators beyond the leading one yields 0.
pub fn folder_depth(logical_path: &str) -> usize {
    logical_path.matches('/').count().saturating_sub(1)
}

/// `"../"` repeated `depth` times. Depth 0 yields an empty prefix.
pub fn relative_prefix(depth: usize) -> String {
    "../".repeat(depth)
}

/// Joins a climb prefix and a target path. At depth 0 the prefix is empty
/// and the target passes through unchanged.
pub fn join_relative(prefix: &str, target: &str) -> String {
    format!("{prefix}{target}")
}
