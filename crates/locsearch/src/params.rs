use crate::prelude::{eprintln, println, *};
use locsearch_core::params::{migrate_value, CATEGORY_KEY};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Parser)]
#[command(name = "params")]
#[command(about = "Inspect and upgrade stored search parameters")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Upgrade a stored parameter object to the current format
    #[clap(name = "migrate")]
    Migrate(MigrateOptions),
}

#[derive(Debug, clap::Args)]
#[command(after_help = "EXAMPLES:
  # Print the migrated parameters:
  locsearch params migrate params.json

  # Read from stdin:
  echo '{\"q\": \"football\", \"partof\": 2}' | locsearch params migrate

  # Rewrite the file:
  locsearch params migrate params.json --in-place")]
pub struct MigrateOptions {
    /// JSON file holding the parameters (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Write the result back to FILE instead of printing it
    #[arg(long, requires = "file")]
    pub in_place: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Migrate(options) => migrate(options, global),
    }
}

fn migrate(options: MigrateOptions, global: crate::Global) -> Result<()> {
    let input = match &options.file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|_| Error::ReadFailed(path.display().to_string()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|_| Error::ReadFailed("stdin".to_string()))?;
            buffer
        }
    };

    let (migrated, changed) = migrate_params_data(&input)?;

    if global.verbose {
        if changed {
            eprintln!("Rewrote legacy '{CATEGORY_KEY}' index");
        } else {
            eprintln!("Parameters already current");
        }
    }

    match (&options.file, options.in_place) {
        (Some(path), true) => write_params(path, &migrated),
        _ => {
            println!("{}", serde_json::to_string_pretty(&migrated)?);
            Ok(())
        }
    }
}

/// Parse a stored parameter object and migrate it.
///
/// Returns the migrated value and whether anything changed.
pub fn migrate_params_data(input: &str) -> Result<(Value, bool)> {
    let params: Value =
        serde_json::from_str(input).map_err(|e| Error::InvalidParams(e.to_string()))?;

    if !params.is_object() {
        return Err(Error::InvalidParams("expected a JSON object".to_string()).into());
    }

    let migrated = migrate_value(params.clone());
    let changed = migrated != params;

    Ok((migrated, changed))
}

fn write_params(path: &Path, params: &Value) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(params)?;
    contents.push('\n');
    std::fs::write(path, contents)
        .with_context(|| f!("Failed to write parameters to {}", path.display()))
}
