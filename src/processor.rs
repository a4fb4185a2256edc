//! Core copy engine for Mason.
//! Walks the template tree, classifies every entry, and materializes the
//! renamed, rewritten copy under the output root. Per-entry failures are
//! isolated: a file that cannot be rewritten is copied verbatim, and a file
//! that cannot be copied at all is skipped with an error, never aborting the
//! run.

use globset::GlobSet;
use log::{debug, error, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, TemplateTokens};
use crate::error::{Error, Result};
use crate::exclude::compile_exclude_patterns;
use crate::names::{rename_entry, rewrite_content, TargetNames};

/// A single filesystem mutation derived from one template entry.
#[derive(Debug)]
pub enum FileOperation {
    /// Create the directory at `target`; idempotent
    CreateDir { target: PathBuf },
    /// Copy the source file to `target` byte-for-byte
    CopyRaw { target: PathBuf },
    /// Read the source as text, substitute tokens, write to `target`
    Rewrite { target: PathBuf },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::CreateDir { target }
            | FileOperation::CopyRaw { target }
            | FileOperation::Rewrite { target } => target,
        }
    }
}

/// Outcome of classifying one template entry.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the entry inside the template tree
    pub source: PathBuf,
    /// Human-readable verb for the report line
    pub action: &'static str,
    /// The mutation to perform
    pub operation: FileOperation,
}

/// Counters reported after a completed run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CopyStats {
    pub dirs_created: usize,
    pub files_copied: usize,
    pub files_rewritten: usize,
    /// Files that fell back to a verbatim copy after a processing failure
    pub fallbacks: usize,
    /// Entries skipped entirely after even the fallback failed
    pub failures: usize,
}

/// Copies a template tree into an output tree, renaming and rewriting as it
/// goes.
pub struct Processor {
    template_root: PathBuf,
    output_root: PathBuf,
    tokens: TemplateTokens,
    names: TargetNames,
    exclude: GlobSet,
    binary_extensions: HashSet<String>,
}

impl Processor {
    /// Builds a processor from the template configuration and the derived
    /// target names.
    ///
    /// # Errors
    /// * `Error::ExcludeError` if an exclusion pattern fails to compile
    pub fn new(
        template_root: &Path,
        output_root: &Path,
        config: &Config,
        names: &TargetNames,
    ) -> Result<Self> {
        let exclude = compile_exclude_patterns(&config.exclude)?;
        let binary_extensions = config
            .binary_extensions
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect();

        Ok(Self {
            template_root: template_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            tokens: config.tokens.clone(),
            names: names.clone(),
            exclude,
            binary_extensions,
        })
    }

    /// Checks whether an entry base name matches the exclusion set.
    pub fn is_excluded(&self, name: &std::ffi::OsStr) -> bool {
        self.exclude.is_match(Path::new(name))
    }

    /// Checks whether a file is binary, by extension, case-insensitively.
    pub fn is_binary(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.binary_extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    /// Computes the output path for a template entry, substituting tokens in
    /// every path component below the template root.
    ///
    /// # Errors
    /// * `Error::ProcessError` if the entry is not inside the template root
    pub fn target_path(&self, source: &Path) -> Result<PathBuf> {
        let relative = source.strip_prefix(&self.template_root).map_err(|_| {
            Error::ProcessError {
                path: source.display().to_string(),
                reason: "entry is outside the template directory".to_string(),
            }
        })?;

        let mut target = self.output_root.clone();
        for component in relative.components() {
            let name = component.as_os_str().to_string_lossy();
            target.push(rename_entry(&name, &self.tokens, &self.names));
        }
        Ok(target)
    }

    /// Classifies a template entry into the operation that copies it.
    pub fn process(&self, source: &Path) -> Result<ProcessResult> {
        let target = self.target_path(source)?;

        let (action, operation) = if source.is_dir() {
            ("Created", FileOperation::CreateDir { target })
        } else if self.is_binary(source) {
            ("Copied", FileOperation::CopyRaw { target })
        } else {
            ("Rewrote", FileOperation::Rewrite { target })
        };

        Ok(ProcessResult { source: source.to_path_buf(), action, operation })
    }

    fn execute(&self, result: &ProcessResult) -> Result<()> {
        match &result.operation {
            FileOperation::CreateDir { target } => create_dir_all(target),
            FileOperation::CopyRaw { target } => copy_file(&result.source, target),
            FileOperation::Rewrite { target } => {
                let bytes = fs::read(&result.source).map_err(Error::IoError)?;
                let text = decode_text(&bytes);
                let rewritten = rewrite_content(&text, &self.tokens, &self.names);
                write_file(&rewritten, target)?;
                copy_permissions(&result.source, target)
            }
        }
    }

    /// Walks the template tree and copies every non-excluded entry.
    ///
    /// Excluded directories are pruned: their contents are never visited.
    /// Entry-level failures are logged and the walk continues; the returned
    /// stats record fallbacks and skips.
    pub fn copy_tree(&self) -> CopyStats {
        let mut stats = CopyStats::default();

        let walker = WalkDir::new(&self.template_root)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            // The root itself is never exclusion-checked, only its entries.
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry.file_name()));

        for dir_entry in walker {
            let entry = match dir_entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    stats.failures += 1;
                    continue;
                }
            };

            debug!("Processing '{}'", entry.path().display());

            let result = match self.process(entry.path()) {
                Ok(result) => result,
                Err(e) => {
                    warn!("{}", e);
                    stats.failures += 1;
                    continue;
                }
            };

            match self.execute(&result) {
                Ok(()) => {
                    println!("{}: '{}'", result.action, result.operation.target().display());
                    match &result.operation {
                        FileOperation::CreateDir { .. } => stats.dirs_created += 1,
                        FileOperation::CopyRaw { .. } => stats.files_copied += 1,
                        FileOperation::Rewrite { .. } => stats.files_rewritten += 1,
                    }
                }
                Err(e) => match &result.operation {
                    FileOperation::CreateDir { target } => {
                        error!("Could not create directory '{}': {}", target.display(), e);
                        stats.failures += 1;
                    }
                    operation => {
                        warn!(
                            "Could not process '{}': {}. Copying it verbatim instead.",
                            result.source.display(),
                            e
                        );
                        match copy_file(&result.source, operation.target()) {
                            Ok(()) => {
                                println!("Copied: '{}'", operation.target().display());
                                stats.fallbacks += 1;
                            }
                            Err(fallback_err) => {
                                error!(
                                    "Could not copy '{}': {}",
                                    result.source.display(),
                                    fallback_err
                                );
                                stats.failures += 1;
                            }
                        }
                    }
                },
            }
        }

        stats
    }
}

/// Decodes bytes as UTF-8, dropping invalid sequences instead of replacing
/// them or failing.
pub fn decode_text(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(tail) => {
                out.push_str(tail);
                return out;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                if let Ok(chunk) = std::str::from_utf8(valid) {
                    out.push_str(chunk);
                }
                match e.error_len() {
                    Some(len) => rest = &after[len..],
                    // Truncated sequence at the end of input
                    None => return out,
                }
            }
        }
    }
}

/// Rejects runs where one root is nested inside the other. A destination
/// inside the template would be walked into; a template inside the
/// destination would be removed by the overwrite path.
pub fn ensure_disjoint_roots(template_root: &Path, output_root: &Path) -> Result<()> {
    let template_abs = absolutize(template_root);
    let output_abs = absolutize(output_root);
    let template = fs::canonicalize(&template_abs).unwrap_or_else(|_| template_abs.clone());
    let output = fs::canonicalize(&output_abs).unwrap_or_else(|_| output_abs.clone());

    if output.starts_with(&template)
        || template.starts_with(&output)
        || output_abs.starts_with(&template_abs)
        || template_abs.starts_with(&output_abs)
    {
        return Err(Error::OverlappingPathsError {
            template_dir: template_root.display().to_string(),
            output_dir: output_root.display().to_string(),
        });
    }
    Ok(())
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

/// Creates a directory and any missing parents; succeeds if it already
/// exists.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(absolutize(path)).map_err(Error::IoError)
}

/// Copies a file byte-for-byte, creating parent directories as needed.
/// Permission metadata is carried over by the copy itself.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    let abs_dest = absolutize(dest);

    if let Some(parent) = abs_dest.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::copy(source, abs_dest).map(|_| ()).map_err(Error::IoError)
}

fn write_file(content: &str, dest: &Path) -> Result<()> {
    let abs_dest = absolutize(dest);

    if let Some(parent) = abs_dest.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::write(abs_dest, content).map_err(Error::IoError)
}

fn copy_permissions(source: &Path, dest: &Path) -> Result<()> {
    let permissions = fs::metadata(source).map_err(Error::IoError)?.permissions();
    fs::set_permissions(absolutize(dest), permissions).map_err(Error::IoError)
}
