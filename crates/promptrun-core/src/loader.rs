//! JSONL dataset loading.
//!
//! The loading pipeline is split into three layers so the one fallible,
//! data-dependent operation (per-line validation) never aborts an
//! otherwise-valid batch, while file-level errors stay fatal:
//!
//! - [`read_lines`]: raw non-blank lines with 1-indexed line numbers
//! - [`parse_record`]: one line into one record, or a logged skip
//! - [`load_records`]: the composed record stream
//!
//! [`JsonlDatasetLoader`] wraps the pipeline behind the
//! [`DatasetSource`] contract, adding an immutable path configuration
//! and an explicitly-tracked materialization cache.

use crate::model::DatasetRecord;
use crate::observe::{LoadObserver, TracingObserver};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, info_span, Span};

/// Default folder datasets are resolved under.
pub const DEFAULT_FOLDER: &str = "./data/input";

/// Errors that can occur when loading a dataset.
///
/// A malformed line is not an error at this level: it is logged,
/// reported to the observer, and skipped inside the stream.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The configured path did not exist when the file was opened.
    #[error("dataset file not found: {path}")]
    NotFound {
        /// The path that was resolved for the load.
        path: PathBuf,
    },

    /// Any other I/O failure while opening or reading the file.
    #[error("failed to read dataset: {0}")]
    Io(#[from] io::Error),

    /// The source cannot fetch datasets from a remote location.
    #[error("remote dataset fetch is not supported by this source")]
    RemoteFetchUnsupported,
}

/// Where a dataset file lives: a folder plus a file name.
///
/// The resolved path is always recomputed from the current values,
/// never cached, so replacing the file name is enough to point the next
/// load somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    folder: PathBuf,
    file_name: String,
}

impl DatasetConfig {
    /// Create a config from a folder and file name.
    pub fn new(folder: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            file_name: file_name.into(),
        }
    }

    /// Copy of this config pointing at a different file name.
    pub fn with_file_name(&self, file_name: impl Into<String>) -> Self {
        Self {
            folder: self.folder.clone(),
            file_name: file_name.into(),
        }
    }

    /// The configured folder.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The configured file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The path the next load will read from.
    pub fn path(&self) -> PathBuf {
        resolve_path(&self.folder, &self.file_name)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from(DEFAULT_FOLDER),
            file_name: String::new(),
        }
    }
}

/// Join a dataset folder and file name into a file-system path.
///
/// Pure path arithmetic: no I/O is performed and the result is not
/// checked for existence.
pub fn resolve_path(folder: impl AsRef<Path>, file_name: &str) -> PathBuf {
    folder.as_ref().join(file_name)
}

/// Streaming iterator over the non-blank lines of a text file.
///
/// Yields `(line_number, raw_text)` tuples. Line numbers are 1-indexed
/// and count every physical line, including the blank ones that are
/// never yielded. The underlying file handle is released when the
/// iterator is dropped, whether it was exhausted or abandoned.
pub struct LineIter {
    lines: Lines<BufReader<File>>,
    line_number: usize,
}

impl Iterator for LineIter {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => return Some(Ok((self.line_number, line))),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Open `path` for streaming line reads.
///
/// Fails with [`LoaderError::NotFound`] if the path does not exist at
/// open time; any other open failure maps to [`LoaderError::Io`].
pub fn read_lines(path: impl AsRef<Path>) -> Result<LineIter, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => LoaderError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoaderError::Io(err),
    })?;

    Ok(LineIter {
        lines: BufReader::new(file).lines(),
        line_number: 0,
    })
}

/// Attempt to parse one JSONL line into a [`DatasetRecord`].
///
/// This is the sole place where malformed input is tolerated: on a
/// parse or validation failure the line number and offending text are
/// logged at error level, the skip is reported to the observer, and
/// `None` is returned so the caller drops the line.
pub fn parse_record(
    raw: &str,
    line_number: usize,
    observer: &dyn LoadObserver,
) -> Option<DatasetRecord> {
    match serde_json::from_str::<DatasetRecord>(raw) {
        Ok(record) => Some(record),
        Err(err) => {
            error!(line_number, raw = raw.trim(), %err, "validation error in dataset line");
            observer.record_skipped(line_number, raw);
            None
        }
    }
}

/// Lazy stream of validated records from one file.
///
/// Items are `Result` so that an unexpected I/O failure mid-file
/// surfaces to the consumer; after such a failure the stream is fused.
/// Malformed lines never appear as items at all.
pub struct RecordStream {
    lines: LineIter,
    observer: Arc<dyn LoadObserver>,
    path: PathBuf,
    span: Span,
    fused: bool,
}

impl Iterator for RecordStream {
    type Item = Result<DatasetRecord, LoaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        let _guard = self.span.enter();

        loop {
            match self.lines.next()? {
                Ok((line_number, raw)) => {
                    if let Some(record) = parse_record(&raw, line_number, self.observer.as_ref()) {
                        self.observer.record_loaded();
                        return Some(Ok(record));
                    }
                    // skipped line already logged and counted
                }
                Err(err) => {
                    self.fused = true;
                    let err = LoaderError::Io(err);
                    error!(path = %self.path.display(), %err, "unexpected error while loading dataset");
                    self.observer.load_failed(&self.path, &err.to_string());
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Load dataset records from a JSONL file.
///
/// Returns a lazy stream yielding one [`DatasetRecord`] per valid line,
/// in file order. The observer counter is bumped once per parsed
/// record. A missing file fails this call with
/// [`LoaderError::NotFound`] after the load span is marked failed; no
/// partial results are produced in that case.
pub fn load_records(
    path: impl AsRef<Path>,
    observer: Arc<dyn LoadObserver>,
) -> Result<RecordStream, LoaderError> {
    let path = path.as_ref().to_path_buf();
    let span = info_span!("load_records", path = %path.display());

    let lines = {
        let _guard = span.enter();
        info!(path = %path.display(), "loading dataset records");
        match read_lines(&path) {
            Ok(lines) => lines,
            Err(err) => {
                error!(path = %path.display(), %err, "failed to open dataset");
                observer.load_failed(&path, &err.to_string());
                return Err(err);
            }
        }
    };

    Ok(RecordStream {
        lines,
        observer,
        path,
        span,
        fused: false,
    })
}

/// Capability contract for dataset sources.
///
/// The concrete JSONL loader is one implementation; test doubles can
/// stand in wherever a source is consumed.
pub trait DatasetSource {
    /// Path the next load will read from.
    fn file_path(&self) -> PathBuf;

    /// Load records from the locally-configured file.
    ///
    /// A supplied `file_name` replaces the configured one for this and
    /// subsequent calls. Any cached materialized data is discarded, and
    /// the file is re-read from scratch.
    fn load_from_local(&mut self, file_name: Option<&str>) -> Result<RecordStream, LoaderError>;

    /// Materialized records, memoized.
    ///
    /// The first access drains a fresh record stream into an owned list
    /// in file order; later accesses return the same list without
    /// touching the file again. An empty dataset is cached like any
    /// other result.
    fn records(&mut self) -> Result<&[DatasetRecord], LoaderError>;

    /// Whether this source can fetch datasets from a remote location.
    fn supports_remote(&self) -> bool {
        false
    }

    /// Fetch the file from a remote location if missing, then load it.
    ///
    /// Sources that do not support remote fetch fail with
    /// [`LoaderError::RemoteFetchUnsupported`]; probe
    /// [`supports_remote`](Self::supports_remote) first.
    fn load_from_remote(&mut self, file_name: Option<&str>) -> Result<RecordStream, LoaderError> {
        let _ = file_name;
        Err(LoaderError::RemoteFetchUnsupported)
    }
}

/// Dataset source backed by a local JSONL file.
pub struct JsonlDatasetLoader {
    config: DatasetConfig,
    observer: Arc<dyn LoadObserver>,
    /// `Some` once a drain has completed, even one that produced
    /// nothing, so an empty dataset is never re-read.
    materialized: Option<Vec<DatasetRecord>>,
}

impl JsonlDatasetLoader {
    /// Create a loader reporting to the default tracing observer.
    pub fn new(config: DatasetConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Create a loader reporting to the given observer.
    pub fn with_observer(config: DatasetConfig, observer: Arc<dyn LoadObserver>) -> Self {
        Self {
            config,
            observer,
            materialized: None,
        }
    }

    /// The current path configuration.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Point the loader at a different file name.
    ///
    /// Discards any cached materialized data.
    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.config = self.config.with_file_name(file_name);
        self.materialized = None;
    }
}

impl DatasetSource for JsonlDatasetLoader {
    fn file_path(&self) -> PathBuf {
        self.config.path()
    }

    fn load_from_local(&mut self, file_name: Option<&str>) -> Result<RecordStream, LoaderError> {
        if let Some(file_name) = file_name {
            self.set_file_name(file_name);
        } else {
            self.materialized = None;
        }
        load_records(self.config.path(), Arc::clone(&self.observer))
    }

    fn records(&mut self) -> Result<&[DatasetRecord], LoaderError> {
        if self.materialized.is_none() {
            let stream = load_records(self.config.path(), Arc::clone(&self.observer))?;
            self.materialized = Some(stream.collect::<Result<Vec<_>, _>>()?);
        }
        Ok(self.materialized.as_deref().unwrap_or_default())
    }
}
