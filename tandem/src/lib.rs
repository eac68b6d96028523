//! Tandem Core - Rust business logic for the bilingual document viewer
//!
//! This library implements the search and viewer-synchronization core of the
//! Tandem split-pane reader: lexical matching over original/translated text
//! pairs, position-accurate highlight spans, and proportional dual-pane
//! scroll mirroring. Document ingestion (upload, OCR, language detection,
//! translation) happens in an external pipeline; this crate only operates on
//! the resulting text pairs.

pub mod highlight;
pub mod interface;
pub mod language;
pub mod models;
pub mod search;
mod store;
pub mod sync;

pub use interface::*;
pub use models::DocumentPair;
pub use store::DocumentStore;
pub use sync::{MirrorUpdate, ScrollState, ViewSyncController};
