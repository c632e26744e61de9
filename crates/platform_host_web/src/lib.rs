//! Browser (`wasm32`) implementations of [`platform_host`] contracts.
//!
//! [`WebDocumentHost`] backs overlay controllers with the live document (focus, body marker,
//! scroll lock, `aria-hidden` siblings, and window listeners); [`ConsoleAnalyticsSink`] reports
//! component analytics to the console. On non-wasm targets the document adapter degrades to an
//! inert host with no document.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod analytics;
pub mod document;

pub use analytics::ConsoleAnalyticsSink;
pub use document::{DocumentDispatcher, WebDocumentHost};
