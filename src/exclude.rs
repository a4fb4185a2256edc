//! Exclusion pattern handling for Mason templates.
//! Compiles the configured entry-name patterns into a glob set so that
//! matched entries, and everything beneath a matched directory, are never
//! copied.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiles exclusion patterns into a `GlobSet`.
///
/// Patterns are matched against entry base names, not full paths: a literal
/// pattern matches a name exactly, a pattern with a leading `*` matches a
/// name suffix.
///
/// # Arguments
/// * `patterns` - Exclusion patterns from the template configuration
///
/// # Returns
/// * `Result<GlobSet>` - Set of compiled glob patterns for name matching
///
/// # Errors
/// * `Error::ExcludeError` if a pattern fails to compile
pub fn compile_exclude_patterns(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| {
            Error::ExcludeError(format!("invalid pattern '{}': {}", pattern, e))
        })?);
    }

    builder
        .build()
        .map_err(|e| Error::ExcludeError(format!("pattern set failed to compile: {}", e)))
}
