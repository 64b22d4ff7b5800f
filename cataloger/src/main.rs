use std::time::Instant;

use catalog::error::{Chainable, Result};
use catalog::{error, Catalog, Extractor, Silent};

use crate::config::Config;

mod config;
mod emit;

pub const CONFIG_FILE: &str = "catalog.toml";
pub const DATA_DIR: &str = "_data";

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Extracts catalog records from sample server sources.
        cmd cataloger {
            /// Directory holding the sample sources.
            required samples: PathBuf
            /// Directory the data files are written to.
            optional -o, --output output: PathBuf
            /// Configuration file; defaults to `catalog.toml` in the samples directory.
            optional -c, --config config: PathBuf
            /// Only report errors.
            optional -q, --quiet
        }
    }
}

fn init_tracing(quiet: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .chain(error!("failed to initialize logging"))
}

fn run(flags: &flags::Cataloger) -> Result<()> {
    let start = Instant::now();
    let config = Config::discover(&flags.samples, flags.config.as_deref())?;
    if let Some(source) = &config.source {
        tracing::info!(path = %source.display(), "loaded configuration");
    }

    let output = config.output(flags.output.as_deref());
    let extractor_config = config.settings.extractor;
    let catalog: Catalog = if flags.quiet {
        Extractor::with_reporter(extractor_config, Silent).scan_directory(&flags.samples)?
    } else {
        Extractor::new(extractor_config).scan_directory(&flags.samples)?
    };

    tracing::info!(
        records = catalog.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "extraction complete"
    );

    let written = emit::write_catalog(&output, &catalog).chain_with(|| error! {
        "failed to write catalog data",
        "output directory" => output.display(),
    })?;

    for path in &written {
        tracing::info!(path = %path.display(), "wrote");
    }

    Ok(())
}

pub fn main() {
    let flags = flags::Cataloger::from_env_or_exit();
    if let Err(e) = init_tracing(flags.quiet) {
        eprintln!("warning: {e}");
    }

    if let Err(e) = run(&flags) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
