//! # promptrun-core
//!
//! JSONL dataset loading for the promptrun tools.
//!
//! This crate streams query/ground-truth records out of line-delimited
//! JSON files into validated [`DatasetRecord`]s, tolerating malformed
//! lines without aborting an otherwise-valid load.
//!
//! ## Key Guarantees
//!
//! 1. **Streaming**: lines are read lazily, never the whole file at once
//! 2. **Order-preserving**: records come out in file order
//! 3. **Tolerant per line**: a malformed line is logged, counted, and
//!    skipped; it never fails the load
//! 4. **Fatal per file**: a missing or unreadable file fails the whole
//!    load call
//!
//! ## Example
//!
//! ```rust,ignore
//! use promptrun_core::{DatasetConfig, DatasetSource, JsonlDatasetLoader};
//!
//! let config = DatasetConfig::new("./data/input", "questions.jsonl");
//! let mut loader = JsonlDatasetLoader::new(config);
//!
//! for record in loader.load_from_local(None)? {
//!     let record = record?;
//!     println!("{}", record.query);
//! }
//! ```

pub mod loader;
pub mod model;
pub mod observe;

// Re-export main types at crate root
pub use loader::{
    load_records, parse_record, read_lines, resolve_path, DatasetConfig, DatasetSource,
    JsonlDatasetLoader, LineIter, LoaderError, RecordStream, DEFAULT_FOLDER,
};
pub use model::DatasetRecord;
pub use observe::{CountingObserver, LoadObserver, NullObserver, TracingObserver};
