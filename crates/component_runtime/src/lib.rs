//! Headless behavior for the design system's interactive components.
//!
//! The crate owns the overlay (modal) lifecycle state machine and the pagination range
//! calculator, both expressed as typed inputs and outbound messages so they run identically in
//! the browser (through `platform_host_web`) and in tests (through
//! [`platform_host::MemoryDocument`]). Leptos primitives in `system_ui` only bind these to the
//! DOM.

#![warn(rustdoc::broken_intra_doc_links)]

pub mod analytics;
pub mod config;
pub mod focus;
pub mod model;
pub mod overlay;
pub mod pagination;

pub use config::{parse_overlay_config, parse_pagination_config, ConfigError};
pub use model::{
    OverlayConfig, OverlayId, PaginationConfig, PaginationRequest, DEFAULT_MAX_PAGE_LIST_LENGTH,
    OVERLAY_BODY_MARKER,
};
pub use overlay::{
    overlay_registry, reduce_overlay, CloseReason, EventOutcome, OverlayAction,
    OverlayController, OverlayEffect, OverlayError, OverlayMessage, OverlayPhase,
    OverlayRegistry, OverlaySession, OverlayState,
};
pub use pagination::{
    is_activation_key, paginate, PageControl, PageSelection, PaginateAction, PaginationController,
    PaginationMessage, PaginationModel,
};
