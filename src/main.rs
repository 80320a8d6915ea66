use std::{fs, io::Write, path::PathBuf};

use anyhow::Context;
use clap::Parser;

use model_schema::{
    config::{AppConfig, defaults},
    db,
    introspect::{SchemaTables, build_schema},
    logging::init_tracing,
};

#[derive(Parser)]
#[command(author, version, about = "Print the model schema of the bundled entities as JSON")]
struct Cli {
    /// Write the schema to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Single-line JSON (overrides APP_OUTPUT__PRETTY)
    #[arg(long)]
    compact: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!("schema export failed: {err:?}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            init_tracing(defaults::DEFAULT_RUST_LOG);
            return Err(err.context("failed to load config"));
        }
    };
    init_tracing(&cfg.logging.rust_log);

    let tables = SchemaTables::from_config(&cfg.introspection);
    let catalog = db::sample_catalog();
    let schemas = build_schema(&catalog, &tables)?;

    let rendered = if cfg.output.pretty && !cli.compact {
        serde_json::to_string_pretty(&schemas)?
    } else {
        serde_json::to_string(&schemas)?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, rendered + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "schema written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
        }
    }
    Ok(())
}
