//! Planning and running one vendoring pass.
//!
//! A run has three phases:
//!
//! 1. **Plan**: list the component sources (the seeds) and every header under
//!    the configured category directories, then resolve the include closure
//!    of the seeds. Jobs are deduplicated by destination.
//! 2. **Render**: read and rewrite every planned file in memory.
//! 3. **Write**: write the rendered files, with a progress bar.
//!
//! Any input error (malformed directive, missing dependency, unreadable
//! source) happens in the first two phases, so it ends the run before a
//! single file has been written.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::VendorConfig;
use crate::core::{Result, VendorError};
use crate::materializer::{MaterializeJob, Materializer, RenderedFile};
use crate::resolver::{ClosureResolver, FsSourceTree, VisitedSet};
use crate::utils::fs::{find_files, relative_slash_path};
use crate::utils::progress::ProgressBar;

/// Options that change how a run behaves but not what it produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Plan and render, but write nothing
    pub dry_run: bool,
    /// Show a progress bar while writing
    pub show_progress: bool,
}

/// The files a run will produce.
#[derive(Debug, Clone, Default)]
pub struct RunPlan {
    /// Component sources, also the seeds of the closure walk
    pub sources: Vec<MaterializeJob>,
    /// Headers found under the category directories
    pub category_headers: Vec<MaterializeJob>,
    /// Transitive include closure of the sources
    pub dependencies: VisitedSet,
}

impl RunPlan {
    /// All jobs in processing order: sources, category headers, then
    /// dependencies.
    pub fn jobs(&self) -> impl Iterator<Item = MaterializeJob> + '_ {
        self.sources
            .iter()
            .cloned()
            .chain(self.category_headers.iter().cloned())
            .chain(self.dependencies.iter().map(MaterializeJob::header))
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of distinct transitively resolved dependency paths
    pub dependencies: usize,
    /// Number of distinct destination files rendered
    pub files_rendered: usize,
    /// Number of files written (zero on a dry run)
    pub files_written: usize,
    /// Whether writing was skipped
    pub dry_run: bool,
}

/// Build the plan for `config`.
///
/// # Errors
///
/// - [`VendorError::SourceRootNotFound`] if the source root is not a directory
/// - [`VendorError::FileSystemError`] if a directory walk or seed read fails
/// - [`VendorError::MissingDependency`] or [`VendorError::MalformedDirective`]
///   from the closure walk
pub fn plan(config: &VendorConfig) -> Result<RunPlan> {
    if !config.source_root.is_dir() {
        return Err(VendorError::SourceRootNotFound {
            path: config.source_root.display().to_string(),
        });
    }

    let settings = &config.settings;
    let pattern = settings.source_glob()?;

    let sources: Vec<MaterializeJob> =
        list_relative(config, &config.component_source_dir(), &pattern)?
            .into_iter()
            .map(MaterializeJob::library_source)
            .collect();
    info!("Found {} {} sources", sources.len(), settings.component);

    let mut category_headers = Vec::new();
    for category in &settings.header_categories {
        let found = list_relative(config, &config.category_dir(category), &pattern)?;
        debug!("Category {}: {} headers", category, found.len());
        category_headers.extend(found.into_iter().map(MaterializeJob::header));
    }
    info!("Found {} category headers", category_headers.len());

    let tree = FsSourceTree::new(&config.source_root);
    let resolver = ClosureResolver::new(&tree, settings.namespace.path_marker());
    let mut dependencies = VisitedSet::new();
    for source in &sources {
        resolver.resolve(&source.source, &mut dependencies)?;
    }
    info!("Resolved {} dependencies", dependencies.len());

    Ok(RunPlan {
        sources,
        category_headers,
        dependencies,
    })
}

/// Run a full vendoring pass for `config`.
///
/// # Errors
///
/// Any error from [`plan`], plus rendering errors
/// ([`VendorError::MalformedDirective`], [`VendorError::FileSystemError`])
/// and write errors ([`VendorError::FileSystemError`]). Errors from planning
/// and rendering leave the destination untouched.
pub fn run(config: &VendorConfig, options: &RunOptions) -> Result<RunReport> {
    let plan = plan(config)?;
    let materializer = Materializer::new(config)?;
    let tree = FsSourceTree::new(&config.source_root);

    let rendered = render_all(&materializer, &tree, &plan)?;
    info!("Rendered {} files", rendered.len());

    let files_written = if options.dry_run {
        info!("Dry run, nothing written to {}", config.dest_root.display());
        0
    } else {
        write_all(&materializer, &rendered, options.show_progress)?
    };

    Ok(RunReport {
        dependencies: plan.dependencies.len(),
        files_rendered: rendered.len(),
        files_written,
        dry_run: options.dry_run,
    })
}

fn render_all(
    materializer: &Materializer,
    tree: &FsSourceTree,
    plan: &RunPlan,
) -> Result<Vec<RenderedFile>> {
    let mut by_destination: BTreeMap<String, MaterializeJob> = BTreeMap::new();
    for job in plan.jobs() {
        let destination = materializer.destination_for(&job);
        if let Some(previous) = by_destination.get(&destination)
            && previous.source != job.source
        {
            warn!(
                "{} and {} both map to {}, keeping {}",
                previous.source, job.source, destination, job.source
            );
        }
        by_destination.insert(destination, job);
    }

    by_destination.values().map(|job| materializer.render(tree, job)).collect()
}

fn write_all(
    materializer: &Materializer,
    files: &[RenderedFile],
    show_progress: bool,
) -> Result<usize> {
    let progress = ProgressBar::new_if(show_progress, files.len() as u64);
    progress.set_prefix("Writing");

    for file in files {
        progress.set_message(file.destination.clone());
        if let Err(e) = materializer.write(file) {
            progress.finish_and_clear();
            return Err(e);
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Wrote {} files", files.len());
    Ok(files.len())
}

/// Library-relative paths of the files under `dir` matching `pattern`.
///
/// A missing directory is not an error: the snapshot may lack a category.
fn list_relative(
    config: &VendorConfig,
    dir: &Path,
    pattern: &glob::Pattern,
) -> Result<Vec<String>> {
    if !dir.is_dir() {
        warn!("Skipping missing directory {}", dir.display());
        return Ok(Vec::new());
    }

    find_files(dir, pattern)?
        .into_iter()
        .map(|path| {
            relative_slash_path(&config.source_root, &path).ok_or_else(|| {
                VendorError::FileSystemError {
                    operation: "list sources".to_string(),
                    path: path.display().to_string(),
                    reason: "path is not valid UTF-8".to_string(),
                }
            })
        })
        .collect()
}
