//! Command-line interface for pothos-extract.
//!
//! ```bash
//! # Vendor Boost.Serialization from an unpacked release
//! pothos-extract boost_1_55_0 PothosSerialization
//!
//! # See what would be vendored without writing anything
//! pothos-extract --dry-run --verbose boost_1_55_0 PothosSerialization
//!
//! # Use custom naming and layout rules
//! pothos-extract --config vendor.toml boost_1_55_0 out
//! ```
//!
//! On success the number of distinct dependency headers resolved from the
//! component sources is printed to stdout, on a line of its own. Logs and
//! the progress bar go to stderr.
//!
//! # Global Options
//!
//! - `--verbose` - debug logging
//! - `--quiet` - errors only, no progress bar
//! - `--no-progress` - no progress bar
//! - `--config` - settings file, see [`VendorSettings`]
//!
//! `RUST_LOG` overrides the level chosen by `--verbose`/`--quiet`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{VendorConfig, VendorSettings};
use crate::pipeline::{RunOptions, RunReport, run};

#[derive(Parser, Debug)]
#[command(
    name = "pothos-extract",
    about = "Vendor Boost.Serialization into the Pothos namespace",
    version,
    long_about = "Resolves the include closure of a library component, renames its namespace, \
                  macros, and include paths, and writes the result under a destination root."
)]
pub struct Cli {
    /// Root of the unpacked library release (contains `libs/` and `boost/`)
    #[arg(value_name = "SOURCE_ROOT")]
    pub source_root: PathBuf,

    /// Directory that receives `lib/` and `include/`
    #[arg(value_name = "DEST_ROOT")]
    pub dest_root: PathBuf,

    /// Settings file (TOML) overriding the default naming and layout rules
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resolve and rewrite everything, but write no files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Log level implied by the verbosity flags.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }

    /// Run options implied by the flags.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            show_progress: !(self.no_progress || self.quiet || self.dry_run),
        }
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the verbosity flags. Calling this more
    /// than once is harmless.
    pub fn init_logging(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_level()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load settings and build the run configuration.
    ///
    /// # Errors
    ///
    /// Fails when the settings file cannot be read or is invalid.
    pub fn build_config(&self) -> Result<VendorConfig> {
        let settings = VendorSettings::load_with_optional(self.config.as_deref())?;
        if let Some(path) = &self.config {
            debug!("Loaded settings from {}", path.display());
        }
        Ok(VendorConfig::new(&self.source_root, &self.dest_root, settings)?)
    }

    /// Run the vendoring pass without printing the result.
    ///
    /// # Errors
    ///
    /// Any configuration or pipeline error.
    pub fn run(&self) -> Result<RunReport> {
        let config = self.build_config()?;
        run(&config, &self.run_options()).with_context(|| {
            format!(
                "Failed to vendor {} into {}",
                config.source_root.display(),
                config.dest_root.display()
            )
        })
    }

    /// Run and print the dependency count to stdout.
    ///
    /// # Errors
    ///
    /// See [`Cli::run`].
    pub fn execute(self) -> Result<()> {
        let report = self.run()?;
        println!("{}", report.dependencies);
        Ok(())
    }
}
