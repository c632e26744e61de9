//! Shared UI primitive library for the design system's interactive components.
//!
//! The crate owns reusable Leptos primitives and the stable `data-ui-*` DOM contract consumed by
//! the design-system CSS layers. Behavior lives in `component_runtime`; these primitives bind it
//! to the live document through `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod primitives;

pub use primitives::{Button, ButtonSize, ButtonVariant, Modal, Pagination};

/// Convenience imports for application crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{Button, ButtonSize, ButtonVariant, Modal, Pagination};
    pub use component_runtime::{CloseReason, OverlayConfig, PaginationConfig};
    pub use platform_host::AnalyticsEvent;
}
