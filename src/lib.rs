//! Mason is an app-scaffolding tool.
//! It copies a local template directory tree into a new application
//! directory, replacing placeholder name tokens in file contents and in
//! file and directory names along the way.

/// Command-line interface module for the Mason application
pub mod cli;

/// Configuration handling for Mason templates
/// Supports JSON and YAML formats (mason.json, mason.yml, mason.yaml)
pub mod config;

/// Error types and handling for the Mason application
pub mod error;

/// Entry exclusion patterns
/// Compiles configured name patterns so matched entries are never copied
pub mod exclude;

/// Application name validation, derivation and token substitution
pub mod names;

/// Core copy engine
/// Walks the template tree and materializes the renamed, rewritten copy
pub mod processor;

/// User input and interaction handling
pub mod prompt;
