//! Pure overlay transition engine: actions in, ordered side-effect intents out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{OverlayConfig, OverlayId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Externally observable overlay states.
pub enum OverlayPhase {
    /// Not shown; no global state held.
    #[default]
    Closed,
    /// Shown; holds focus, body marker, scroll lock, hidden siblings, and listeners.
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// What ended an open overlay.
pub enum CloseReason {
    /// The owner flipped `visible` to false.
    External,
    /// Escape was pressed while the overlay was topmost.
    Escape,
    /// A pointer went down outside the overlay root with click-to-close enabled.
    OutsideClick,
    /// The built-in close button was activated.
    CloseButton,
    /// The component unmounted while open.
    Unmount,
}

impl CloseReason {
    /// Whether the owner must be told about the close (it did not initiate it).
    pub fn notifies_owner(self) -> bool {
        matches!(self, Self::Escape | Self::OutsideClick | Self::CloseButton)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inputs accepted by [`reduce_overlay`].
pub enum OverlayAction {
    /// The `visible` property changed (or was re-asserted).
    SetVisible(bool),
    /// A document key listener fired.
    KeyDown {
        /// `KeyboardEvent.key` value.
        key: String,
        /// Whether this overlay is the topmost open overlay.
        topmost: bool,
    },
    /// A document pointer listener fired.
    DocumentClick {
        /// Whether the pointer target lies inside the overlay root.
        inside: bool,
        /// Whether this overlay is the topmost open overlay.
        topmost: bool,
    },
    /// The built-in close button was activated.
    CloseButton,
    /// The owning component is being destroyed.
    Unmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents, executed in order by the overlay controller.
pub enum OverlayEffect {
    /// Create the per-open session and enter the overlay registry.
    BeginSession,
    /// Remember the currently focused element.
    CaptureFocus,
    /// Focus the configured selector target or the first focusable descendant.
    FocusInitialTarget,
    /// Add the body overlay marker class.
    ApplyBodyMarker,
    /// Lock background scrolling.
    LockScroll,
    /// Hide every other top-level node from assistive technology.
    HideBackground,
    /// Register the document key listener.
    ListenForKeys,
    /// Register the document pointer listener.
    ListenForClicks,
    /// Emit the `show` analytics event.
    TrackShow,
    /// Un-hide exactly the nodes hidden by [`OverlayEffect::HideBackground`].
    RevealBackground,
    /// Release the scroll lock.
    UnlockScroll,
    /// Remove the body overlay marker class.
    ClearBodyMarker,
    /// Unregister every listener registered by this session.
    StopListening,
    /// Return focus to the captured element when it is still attached.
    RestoreFocus,
    /// Dispose the session and leave the overlay registry.
    EndSession,
    /// Tell the owner the overlay closed.
    EmitClose(CloseReason),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Rejected overlay actions.
pub enum OverlayError {
    /// An interaction arrived while the overlay was closed.
    #[error("overlay {0} is not open")]
    NotOpen(u64),
    /// The close button was activated although it is configured hidden.
    #[error("overlay {0} has no close button")]
    CloseButtonHidden(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-instance overlay state owned by its controller.
pub struct OverlayState {
    /// Instance id.
    pub id: OverlayId,
    /// Current phase.
    pub phase: OverlayPhase,
    /// Immutable instance configuration.
    pub config: OverlayConfig,
}

impl OverlayState {
    /// Creates a closed overlay state.
    pub fn new(id: OverlayId, config: OverlayConfig) -> Self {
        Self {
            id,
            phase: OverlayPhase::Closed,
            config,
        }
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.phase == OverlayPhase::Open
    }
}

/// Applies an [`OverlayAction`] and returns the side effects to execute, in order.
///
/// Re-asserting the current visibility produces no effects, so opening is idempotent and
/// listener registration can never double up.
///
/// # Errors
///
/// Returns [`OverlayError::NotOpen`] for key, pointer, or close-button input while closed and
/// [`OverlayError::CloseButtonHidden`] when a hidden close button is activated.
pub fn reduce_overlay(
    state: &mut OverlayState,
    action: OverlayAction,
) -> Result<Vec<OverlayEffect>, OverlayError> {
    let id = state.id.0;
    match action {
        OverlayAction::SetVisible(true) => {
            if state.is_open() {
                return Ok(Vec::new());
            }
            state.phase = OverlayPhase::Open;
            Ok(open_effects(&state.config))
        }
        OverlayAction::SetVisible(false) => {
            if !state.is_open() {
                return Ok(Vec::new());
            }
            Ok(close(state, CloseReason::External))
        }
        OverlayAction::KeyDown { key, topmost } => {
            if !state.is_open() {
                return Err(OverlayError::NotOpen(id));
            }
            if !topmost || !is_escape(&key) {
                return Ok(Vec::new());
            }
            Ok(close(state, CloseReason::Escape))
        }
        OverlayAction::DocumentClick { inside, topmost } => {
            if !state.is_open() {
                return Err(OverlayError::NotOpen(id));
            }
            if inside || !topmost || !state.config.click_to_close {
                return Ok(Vec::new());
            }
            Ok(close(state, CloseReason::OutsideClick))
        }
        OverlayAction::CloseButton => {
            if state.config.hide_close_button {
                return Err(OverlayError::CloseButtonHidden(id));
            }
            if !state.is_open() {
                return Err(OverlayError::NotOpen(id));
            }
            Ok(close(state, CloseReason::CloseButton))
        }
        OverlayAction::Unmount => {
            if !state.is_open() {
                return Ok(Vec::new());
            }
            Ok(close(state, CloseReason::Unmount))
        }
    }
}

fn is_escape(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

fn open_effects(config: &OverlayConfig) -> Vec<OverlayEffect> {
    let mut effects = vec![
        OverlayEffect::BeginSession,
        OverlayEffect::CaptureFocus,
        OverlayEffect::FocusInitialTarget,
        OverlayEffect::ApplyBodyMarker,
        OverlayEffect::LockScroll,
        OverlayEffect::HideBackground,
        OverlayEffect::ListenForKeys,
    ];
    if config.click_to_close {
        effects.push(OverlayEffect::ListenForClicks);
    }
    if !config.disable_analytics {
        effects.push(OverlayEffect::TrackShow);
    }
    effects
}

fn close(state: &mut OverlayState, reason: CloseReason) -> Vec<OverlayEffect> {
    state.phase = OverlayPhase::Closed;
    let mut effects = vec![
        OverlayEffect::RevealBackground,
        OverlayEffect::UnlockScroll,
        OverlayEffect::ClearBodyMarker,
        OverlayEffect::StopListening,
        OverlayEffect::RestoreFocus,
        OverlayEffect::EndSession,
    ];
    if reason.notifies_owner() {
        effects.push(OverlayEffect::EmitClose(reason));
    }
    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn state(config: OverlayConfig) -> OverlayState {
        OverlayState::new(OverlayId(7), config)
    }

    fn escape(topmost: bool) -> OverlayAction {
        OverlayAction::KeyDown {
            key: "Escape".to_string(),
            topmost,
        }
    }

    #[test]
    fn open_sequence_follows_capture_focus_mark_lock_hide_listen_order() {
        let mut state = state(OverlayConfig {
            click_to_close: true,
            ..OverlayConfig::default()
        });

        let effects = reduce_overlay(&mut state, OverlayAction::SetVisible(true)).expect("open");

        assert_eq!(
            effects,
            vec![
                OverlayEffect::BeginSession,
                OverlayEffect::CaptureFocus,
                OverlayEffect::FocusInitialTarget,
                OverlayEffect::ApplyBodyMarker,
                OverlayEffect::LockScroll,
                OverlayEffect::HideBackground,
                OverlayEffect::ListenForKeys,
                OverlayEffect::ListenForClicks,
                OverlayEffect::TrackShow,
            ]
        );
        assert_eq!(state.phase, OverlayPhase::Open);
    }

    #[test]
    fn open_skips_click_listener_and_tracking_when_not_configured() {
        let mut state = state(OverlayConfig {
            disable_analytics: true,
            ..OverlayConfig::default()
        });

        let effects = reduce_overlay(&mut state, OverlayAction::SetVisible(true)).expect("open");

        assert!(!effects.contains(&OverlayEffect::ListenForClicks));
        assert!(!effects.contains(&OverlayEffect::TrackShow));
    }

    #[test]
    fn reasserting_visibility_is_a_no_op() {
        let mut state = state(OverlayConfig::default());
        reduce_overlay(&mut state, OverlayAction::SetVisible(true)).expect("open");

        assert_eq!(
            reduce_overlay(&mut state, OverlayAction::SetVisible(true)),
            Ok(Vec::new())
        );

        reduce_overlay(&mut state, OverlayAction::SetVisible(false)).expect("close");
        assert_eq!(
            reduce_overlay(&mut state, OverlayAction::SetVisible(false)),
            Ok(Vec::new())
        );
    }

    #[test]
    fn external_close_tears_down_without_notifying_owner() {
        let mut state = state(OverlayConfig::default());
        reduce_overlay(&mut state, OverlayAction::SetVisible(true)).expect("open");

        let effects = reduce_overlay(&mut state, OverlayAction::SetVisible(false)).expect("close");

        assert_eq!(
            effects,
            vec![
                OverlayEffect::RevealBackground,
                OverlayEffect::UnlockScroll,
                OverlayEffect::ClearBodyMarker,
                OverlayEffect::StopListening,
                OverlayEffect::RestoreFocus,
                OverlayEffect::EndSession,
            ]
        );
        assert_eq!(state.phase, OverlayPhase::Closed);
    }

    #[test]
    fn escape_closes_only_the_topmost_overlay() {
        let mut state = state(OverlayConfig::default());
        reduce_overlay(&mut state, OverlayAction::SetVisible(true)).expect("open");

        assert_eq!(reduce_overlay(&mut state, escape(false)), Ok(Vec::new()));
        assert_eq!(
            reduce_overlay(
                &mut state,
                OverlayAction::KeyDown {
                    key: "Enter".to_string(),
                    topmost: true,
                }
            ),
            Ok(Vec::new())
        );

        let effects = reduce_overlay(&mut state, escape(true)).expect("escape");
        assert_eq!(
            effects.last(),
            Some(&OverlayEffect::EmitClose(CloseReason::Escape))
        );
    }

    #[test]
    fn outside_click_requires_click_to_close() {
        let mut gated = state(OverlayConfig::default());
        reduce_overlay(&mut gated, OverlayAction::SetVisible(true)).expect("open");
        let outside = OverlayAction::DocumentClick {
            inside: false,
            topmost: true,
        };
        assert_eq!(reduce_overlay(&mut gated, outside.clone()), Ok(Vec::new()));
        assert!(gated.is_open());

        let mut closable = state(OverlayConfig {
            click_to_close: true,
            ..OverlayConfig::default()
        });
        reduce_overlay(&mut closable, OverlayAction::SetVisible(true)).expect("open");
        assert_eq!(
            reduce_overlay(
                &mut closable,
                OverlayAction::DocumentClick {
                    inside: true,
                    topmost: true,
                }
            ),
            Ok(Vec::new())
        );
        let effects = reduce_overlay(&mut closable, outside).expect("outside");
        assert_eq!(
            effects.last(),
            Some(&OverlayEffect::EmitClose(CloseReason::OutsideClick))
        );
    }

    #[test]
    fn unmount_while_open_runs_full_teardown() {
        let mut state = state(OverlayConfig::default());
        reduce_overlay(&mut state, OverlayAction::SetVisible(true)).expect("open");

        let effects = reduce_overlay(&mut state, OverlayAction::Unmount).expect("unmount");

        assert!(effects.contains(&OverlayEffect::StopListening));
        assert!(effects.contains(&OverlayEffect::ClearBodyMarker));
        assert_eq!(effects.last(), Some(&OverlayEffect::EndSession));
        assert_eq!(
            reduce_overlay(&mut state, OverlayAction::Unmount),
            Ok(Vec::new())
        );
    }

    #[test]
    fn stray_input_while_closed_is_rejected() {
        let mut state = state(OverlayConfig::default());
        assert_eq!(
            reduce_overlay(&mut state, escape(true)),
            Err(OverlayError::NotOpen(7))
        );
        assert_eq!(
            reduce_overlay(&mut state, OverlayAction::CloseButton),
            Err(OverlayError::NotOpen(7))
        );

        let mut hidden = OverlayState::new(
            OverlayId(8),
            OverlayConfig {
                hide_close_button: true,
                ..OverlayConfig::default()
            },
        );
        reduce_overlay(&mut hidden, OverlayAction::SetVisible(true)).expect("open");
        assert_eq!(
            reduce_overlay(&mut hidden, OverlayAction::CloseButton),
            Err(OverlayError::CloseButtonHidden(8))
        );
        assert!(hidden.is_open());
    }
}
