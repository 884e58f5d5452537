//! Writing rewritten files into the destination tree.
//!
//! A [`MaterializeJob`] names one library file and what kind of file it is.
//! The [`Materializer`] turns a job into a [`RenderedFile`] (read, rewrite,
//! destination computed) and writes rendered files out. The two steps are
//! separate so the pipeline can render everything first and only start
//! writing once no input error can stop the run.
//!
//! Destinations, relative to the destination root:
//!
//! | Job kind                      | Destination                         |
//! |-------------------------------|-------------------------------------|
//! | [`JobKind::LibrarySource`]    | `lib/<basename>`                    |
//! | [`JobKind::Header`]           | `include/<path rule applied to it>` |

use std::path::PathBuf;

use tracing::debug;

use crate::config::VendorConfig;
use crate::core::{Result, VendorError, join_relative};
use crate::resolver::SourceTree;
use crate::rewrite::Rewriter;
use crate::utils::fs::atomic_write;

/// What a planned file is, which decides where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobKind {
    /// A compiled source of the vendored component, flattened into the lib dir
    LibrarySource,
    /// A header, placed by the path rule under the include dir
    Header,
}

/// One library file to vendor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterializeJob {
    /// Library-relative source path, forward-slash separated
    pub source: String,
    /// Kind of file
    pub kind: JobKind,
}

impl MaterializeJob {
    /// A component source file.
    #[must_use]
    pub fn library_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: JobKind::LibrarySource,
        }
    }

    /// A header file.
    #[must_use]
    pub fn header(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: JobKind::Header,
        }
    }
}

/// A file read and rewritten in memory, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Library-relative source path
    pub source: String,
    /// Destination path relative to the destination root
    pub destination: String,
    /// Rewritten content, in the source file's encoding
    pub content: Vec<u8>,
}

/// Reads, rewrites, and writes planned files.
#[derive(Debug, Clone)]
pub struct Materializer {
    rewriter: Rewriter,
    dest_root: PathBuf,
    lib_dir: String,
    include_dir: String,
}

impl Materializer {
    /// Create a materializer for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::ConfigError`] if the rewriter cannot be built.
    pub fn new(config: &VendorConfig) -> Result<Self> {
        Ok(Self {
            rewriter: Rewriter::new(&config.settings)?,
            dest_root: config.dest_root.clone(),
            lib_dir: config.settings.lib_dir.clone(),
            include_dir: config.settings.include_dir.clone(),
        })
    }

    /// The rewriter applied to every file.
    #[must_use]
    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    /// Destination of `job`, relative to the destination root.
    #[must_use]
    pub fn destination_for(&self, job: &MaterializeJob) -> String {
        match job.kind {
            JobKind::LibrarySource => {
                let basename = job.source.rsplit('/').next().unwrap_or(&job.source);
                format!("{}/{}", self.lib_dir, basename)
            }
            JobKind::Header => {
                format!("{}/{}", self.include_dir, self.rewriter.rewrite_path(&job.source))
            }
        }
    }

    /// Absolute destination path for a destination-relative path.
    #[must_use]
    pub fn absolute_destination(&self, destination: &str) -> PathBuf {
        join_relative(&self.dest_root, destination)
    }

    /// Read and rewrite `job` without touching the destination.
    ///
    /// # Errors
    ///
    /// - [`VendorError::FileSystemError`] if the source cannot be read
    /// - [`VendorError::MalformedDirective`] if a line cannot be rewritten
    pub fn render<T: SourceTree + ?Sized>(
        &self,
        tree: &T,
        job: &MaterializeJob,
    ) -> Result<RenderedFile> {
        let source = tree.read_text(&job.source).map_err(|e| VendorError::FileSystemError {
            operation: "read source".to_string(),
            path: tree.locate(&job.source),
            reason: e.to_string(),
        })?;

        let rewritten = self.rewriter.rewrite_text(&job.source, &source.text)?;

        Ok(RenderedFile {
            source: job.source.clone(),
            destination: self.destination_for(job),
            content: source.encode(&rewritten),
        })
    }

    /// Write a rendered file, creating parent directories as needed.
    ///
    /// Returns the absolute path written.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::FileSystemError`] if the destination is not
    /// writable.
    pub fn write(&self, file: &RenderedFile) -> Result<PathBuf> {
        let target = self.absolute_destination(&file.destination);
        atomic_write(&target, &file.content)?;
        debug!("Wrote {} -> {}", file.source, target.display());
        Ok(target)
    }

    /// Render and write `job` in one step.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render) and [`write`](Self::write).
    pub fn materialize<T: SourceTree + ?Sized>(
        &self,
        tree: &T,
        job: &MaterializeJob,
    ) -> Result<PathBuf> {
        let rendered = self.render(tree, job)?;
        self.write(&rendered)
    }
}
