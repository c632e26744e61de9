//! Typed host-domain contracts and shared models used across the component runtime and browser
//! adapters.
//!
//! This crate is the API-first boundary for the global document state overlays mutate and the
//! analytics sink components report to. Concrete browser adapters live in `platform_host_web`;
//! the in-memory [`MemoryDocument`] backs non-browser targets and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod analytics;
pub mod document;
pub mod memory;

pub use analytics::{AnalyticsEvent, AnalyticsSink, MemoryAnalyticsSink};
pub use document::{
    DocumentEvent, DocumentHost, ElementDescriptor, ListenerId, ListenerKind, ScrollLock,
};
pub use memory::{MemoryDocument, MemoryElement, NodeId};
