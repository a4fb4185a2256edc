//! Mason's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the interactive flow, and
//! coordinates interactions between different modules.

use std::fs;

use mason::{
    cli::{get_args, Args},
    config::get_config,
    error::{default_error_handler, Error, Result},
    names::{is_valid_name, TargetNames},
    processor::{create_dir_all, ensure_disjoint_roots, Processor},
    prompt::{confirm_overwrite, prompt_app_name, prompt_output_dir},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Arguments
/// * `args` - Parsed command line arguments
///
/// # Returns
/// * `Result<()>` - Success or error status of the scaffolding run
///
/// # Flow
/// 1. Checks the template directory
/// 2. Loads the template configuration
/// 3. Obtains and validates the application name
/// 4. Resolves the output directory
/// 5. Confirms and removes an existing output directory
/// 6. Copies the template tree
/// 7. Prints the run summary
fn run(args: Args) -> Result<()> {
    let template_root = args.template;
    if !template_root.is_dir() {
        return Err(Error::TemplateDoesNotExistsError {
            template_dir: template_root.display().to_string(),
        });
    }

    let config = get_config(&template_root)?;

    // A name given on the command line fails fast; only the interactive
    // prompt re-asks.
    let raw_name = match args.name {
        Some(name) => {
            if !is_valid_name(&name) {
                return Err(Error::InvalidNameError { name });
            }
            name
        }
        None => prompt_app_name()?,
    };
    let names = TargetNames::derive(&raw_name)?;

    let output_root = match args.output_dir {
        Some(dir) => dir,
        None => {
            let default_dir = config.workspace_root()?.join(&names.kebab);
            prompt_output_dir(&default_dir)?
        }
    };

    ensure_disjoint_roots(&template_root, &output_root)?;

    if output_root.exists() {
        let overwrite = args.force || confirm_overwrite(&output_root)?;
        if !overwrite {
            return Err(Error::OutputDirectoryDeclinedError);
        }
        fs::remove_dir_all(&output_root).map_err(Error::IoError)?;
    }

    println!("Creating new app: {}", names.display);
    println!("Output directory: {}", output_root.display());
    println!("  module name: {}", names.snake);
    println!("  slug:        {}", names.kebab);
    println!("  display:     {}", names.display);
    println!();

    create_dir_all(&output_root)?;

    let processor = Processor::new(&template_root, &output_root, &config, &names)?;
    let stats = processor.copy_tree();

    println!();
    println!(
        "Scaffolding completed in '{}': {} directories, {} files copied, {} files rewritten.",
        output_root.display(),
        stats.dirs_created,
        stats.files_copied + stats.fallbacks,
        stats.files_rewritten
    );
    if stats.fallbacks > 0 {
        println!(
            "{} file(s) were copied verbatim after a processing failure.",
            stats.fallbacks
        );
    }
    if stats.failures > 0 {
        println!("{} entries could not be copied; see the messages above.", stats.failures);
    }

    Ok(())
}
