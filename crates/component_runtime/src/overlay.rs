//! Overlay open/close lifecycle: focus capture and restore, body marker, scroll lock, background
//! `aria-hidden` bookkeeping, and document-level dismissal listeners.
//!
//! [`reduce_overlay`] decides *what* happens for each input; [`OverlayController`] executes the
//! resulting effects against a [`platform_host::DocumentHost`]. Everything acquired while open is
//! recorded in an [`OverlaySession`] and released on every path that ends the open state.
//! Concurrent overlays are tracked by the [`OverlayRegistry`] stack: the innermost overlay owns
//! dismissal input, and shared body state is released when the last overlay closes.

mod controller;
mod reducer;
mod registry;
mod session;

pub use controller::{EventOutcome, OverlayController, OverlayMessage};
pub use reducer::{
    reduce_overlay, CloseReason, OverlayAction, OverlayEffect, OverlayError, OverlayPhase,
    OverlayState,
};
pub use registry::{overlay_registry, OverlayRegistry};
pub use session::OverlaySession;
