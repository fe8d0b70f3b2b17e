//! zodgen CLI.
//!
//! Generates a Zod schema file from a DMMF data model, checks a data model
//! without writing anything, or regenerates on every change.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use tracing_subscriber::EnvFilter;

use zodgen_compiler::{CompileResult, Compiler, CompilerConfig};

mod ui;

#[derive(Parser)]
#[command(name = "zodgen", version)]
#[command(about = "zodgen - generates Zod schemas from a DMMF data model")]
struct Cli {
    /// Log pipeline details (overrides RUST_LOG for zodgen crates)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the schema file
    Generate {
        /// DMMF JSON document describing the data model
        #[arg(short, long, default_value = "dmmf.json")]
        schema: PathBuf,

        /// Destination file, replaced wholesale
        #[arg(short, long, default_value = "generated/zod/index.ts")]
        output: PathBuf,

        /// Skip structural validation of the data model
        #[arg(long)]
        skip_validation: bool,
    },

    /// Validate the data model without generating code
    Check {
        /// DMMF JSON document describing the data model
        #[arg(short, long, default_value = "dmmf.json")]
        schema: PathBuf,
    },

    /// Regenerate the schema file whenever the data model changes
    Watch {
        /// DMMF JSON document describing the data model
        #[arg(short, long, default_value = "dmmf.json")]
        schema: PathBuf,

        /// Destination file, replaced wholesale
        #[arg(short, long, default_value = "generated/zod/index.ts")]
        output: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    ui::header(env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Generate {
            schema,
            output,
            skip_validation,
        } => {
            generate(&schema, &output, skip_validation)?;
        }

        Commands::Check { schema } => {
            check(&schema)?;
        }

        Commands::Watch { schema, output } => {
            run_watch_mode(&schema, &output)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("zodgen=debug,zodgen_compiler=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config(schema: &Path, output: &Path, skip_validation: bool) -> CompilerConfig {
    CompilerConfig {
        schema_path: schema.to_path_buf(),
        output: output.to_path_buf(),
        skip_validation,
    }
}

/// Generate once and print the summary box.
fn generate(schema: &Path, output: &Path, skip_validation: bool) -> miette::Result<()> {
    let start = Instant::now();
    let spinner = ui::spinner("Generating schemas...");

    let compiler = Compiler::new(config(schema, output, skip_validation));
    let result = match compiler.compile() {
        Ok(result) => result,
        Err(e) => {
            spinner.finish_and_clear();
            ui::nope_header();
            return Err(e.into());
        }
    };
    spinner.finish_and_clear();

    print_summary(&result);
    ui::success(&format!("Wrote {}", output.display()));
    ui::timing("Done", start.elapsed().as_millis());
    println!();

    Ok(())
}

fn print_summary(result: &CompileResult) {
    ui::box_header("SCHEMAS");
    ui::box_line("");
    ui::box_stat("entities", result.entities);
    ui::box_stat("enums", result.enums);
    ui::box_stat("declarations", result.fragments);
    ui::box_line("");
    ui::box_footer();
    println!();
}

fn check(schema: &Path) -> miette::Result<()> {
    let spinner = ui::spinner("Checking data model...");
    let compiler = Compiler::new(CompilerConfig {
        schema_path: schema.to_path_buf(),
        ..CompilerConfig::default()
    });

    match compiler.check() {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::looking_good();
            println!();
            println!(
                "    {} entities {} {} enums",
                result.entities,
                ui::symbols::DOT,
                result.enums
            );
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::nope_header();
            Err(e.into())
        }
    }
}

/// Watch the data-model file and regenerate on every change.
///
/// Watches the parent directory and only reacts to events naming the
/// schema file.
fn run_watch_mode(schema: &Path, output: &Path) -> miette::Result<()> {
    let watch_dir = schema
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let file_name = schema.file_name().map(|n| n.to_os_string());

    let (tx, rx) = mpsc::channel::<()>();
    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                let touched = events
                    .iter()
                    .any(|event| event.path.file_name().map(|n| n.to_os_string()) == file_name);
                if touched {
                    let _ = tx.send(());
                }
            }
            Err(e) => tracing::warn!(error = %e, "file watcher error"),
        },
    )
    .into_diagnostic()?;

    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .into_diagnostic()?;

    ui::info(&format!("Watching {}", schema.display()));
    regenerate(schema, output, "Generating schemas...");
    ui::info("Ready! Waiting for changes...");

    // Ends when the debouncer's sender is dropped.
    while rx.recv().is_ok() {
        println!();
        regenerate(schema, output, "Change detected, regenerating...");
        println!();
        ui::info("Ready! Waiting for changes...");
    }

    ui::dim("Stopping watch mode.");
    Ok(())
}

/// One full regeneration; failures are reported and the watch continues.
fn regenerate(schema: &Path, output: &Path, message: &str) {
    let spinner = ui::spinner(message);
    let start = Instant::now();

    let compiler = Compiler::new(config(schema, output, false));
    match compiler.compile() {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::success(&format!(
                "Generated {} declaration(s) for {} entities in {}ms",
                result.fragments,
                result.entities,
                start.elapsed().as_millis()
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::error(&format!("{:?}", miette::Report::new(e)));
        }
    }
}
