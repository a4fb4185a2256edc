//! User input and interaction handling for Mason.
//! Wraps the dialoguer prompts used for the application name, the output
//! directory, and the overwrite confirmation.

use crate::error::{Error, Result};
use crate::names::is_valid_name;
use dialoguer::{Confirm, Input};
use std::path::{Path, PathBuf};

/// Asks for the application name, re-prompting until it is valid.
pub fn prompt_app_name() -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt("Name for the new app")
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;

        if is_valid_name(&input) {
            return Ok(input.trim().to_string());
        }
        eprintln!("Invalid app name: use only letters, digits and spaces.");
    }
}

/// Asks for the output directory, offering a default. A `~` in the answer is
/// expanded to the user's home directory.
pub fn prompt_output_dir(default: &Path) -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("Output directory")
        .default(default.display().to_string())
        .interact_text()
        .map_err(|e| Error::PromptError(e.to_string()))?;

    let expanded = shellexpand::tilde(input.trim());
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Asks whether an existing output directory may be removed and replaced.
/// Defaults to no.
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Directory '{}' already exists. Overwrite it?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| Error::PromptError(e.to_string()))
}
