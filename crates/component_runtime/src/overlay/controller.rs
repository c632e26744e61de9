//! Executes overlay reducer effects against a [`DocumentHost`] and collects outbound messages.

use leptos::logging;
use platform_host::{AnalyticsEvent, DocumentEvent, DocumentHost, ListenerKind};

use super::reducer::{
    reduce_overlay, CloseReason, OverlayAction, OverlayEffect, OverlayPhase, OverlayState,
};
use super::registry::{overlay_registry, OverlayRegistry};
use super::session::OverlaySession;
use crate::analytics;
use crate::focus::{focusable_descendants, initial_focus_target};
use crate::model::{OverlayConfig, OverlayId, OVERLAY_BODY_MARKER};

#[derive(Debug, Clone, PartialEq)]
/// Typed messages for the overlay's owner.
pub enum OverlayMessage {
    /// The overlay closed itself; the owner decides whether to hide or unmount it.
    CloseRequested(CloseReason),
    /// Fire-and-forget analytics event.
    Analytics(AnalyticsEvent),
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of routing a document event through the controller.
pub struct EventOutcome {
    /// Whether the host should suppress the event's default action.
    pub consumed: bool,
    /// Messages for the owner.
    pub messages: Vec<OverlayMessage>,
}

/// Drives one overlay instance over a document host.
pub struct OverlayController<H: DocumentHost> {
    state: OverlayState,
    root: H::Element,
    session: Option<OverlaySession<H::Element>>,
    registry: OverlayRegistry,
}

impl<H: DocumentHost> OverlayController<H> {
    /// Creates a closed controller registered with the process-wide overlay registry.
    pub fn new(root: H::Element, config: OverlayConfig) -> Self {
        Self::with_registry(root, config, overlay_registry())
    }

    /// Creates a closed controller bound to an explicit registry.
    pub fn with_registry(root: H::Element, config: OverlayConfig, registry: OverlayRegistry) -> Self {
        let id = registry.allocate_id();
        Self {
            state: OverlayState::new(id, config),
            root,
            session: None,
            registry,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.state.id
    }

    pub fn phase(&self) -> OverlayPhase {
        self.state.phase
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.state.config
    }

    pub fn root(&self) -> &H::Element {
        &self.root
    }

    /// Live session while open.
    pub fn session(&self) -> Option<&OverlaySession<H::Element>> {
        self.session.as_ref()
    }

    /// Applies the owner's `visible` property.
    pub fn set_visible(&mut self, host: &mut H, visible: bool) -> Vec<OverlayMessage> {
        self.dispatch(host, OverlayAction::SetVisible(visible))
    }

    /// Handles the built-in close button.
    pub fn close_button(&mut self, host: &mut H) -> Vec<OverlayMessage> {
        self.dispatch(host, OverlayAction::CloseButton)
    }

    /// Tears down everything still held. Must run when the owning component is destroyed.
    pub fn unmount(&mut self, host: &mut H) -> Vec<OverlayMessage> {
        self.dispatch(host, OverlayAction::Unmount)
    }

    /// Routes an event from one of this overlay's document listeners.
    pub fn handle_event(&mut self, host: &mut H, event: DocumentEvent<H::Element>) -> EventOutcome {
        match event {
            DocumentEvent::KeyDown { key, shift } => {
                if !self.listening(ListenerKind::KeyDown) {
                    return EventOutcome::default();
                }
                if key == "Tab" {
                    return EventOutcome {
                        consumed: self.wrap_focus(host, shift),
                        messages: Vec::new(),
                    };
                }
                let topmost = self.registry.is_topmost(self.state.id);
                let messages = self.dispatch(host, OverlayAction::KeyDown { key, topmost });
                EventOutcome {
                    consumed: !messages.is_empty(),
                    messages,
                }
            }
            DocumentEvent::PointerDown { target } => {
                if !self.listening(ListenerKind::PointerDown) {
                    return EventOutcome::default();
                }
                let Some(target) = target else {
                    return EventOutcome::default();
                };
                let inside = host.contains(&self.root, &target);
                let topmost = self.registry.is_topmost(self.state.id);
                EventOutcome {
                    consumed: false,
                    messages: self.dispatch(host, OverlayAction::DocumentClick { inside, topmost }),
                }
            }
        }
    }

    /// Keeps sequential focus inside the overlay, wrapping at either edge.
    ///
    /// Returns `true` when focus was moved and the native Tab action should be suppressed.
    pub fn wrap_focus(&mut self, host: &mut H, backwards: bool) -> bool {
        if !self.is_open() || !self.registry.is_topmost(self.state.id) {
            return false;
        }
        let focusable = focusable_descendants(&*host, &self.root);
        let (Some(first), Some(last)) = (focusable.first(), focusable.last()) else {
            host.focus(&self.root);
            return true;
        };

        let active = host.active_element();
        let inside = active
            .as_ref()
            .is_some_and(|active| host.contains(&self.root, active));
        let target = match active {
            _ if !inside => {
                if backwards {
                    last
                } else {
                    first
                }
            }
            Some(active) if backwards && (active == *first || active == self.root) => last,
            Some(active) if !backwards && active == *last => first,
            _ => return false,
        };
        host.focus(target)
    }

    fn listening(&self, kind: ListenerKind) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.listens_for(kind))
    }

    fn dispatch(&mut self, host: &mut H, action: OverlayAction) -> Vec<OverlayMessage> {
        let effects = match reduce_overlay(&mut self.state, action) {
            Ok(effects) => effects,
            Err(err) => {
                logging::warn!("overlay transition rejected: {err}");
                return Vec::new();
            }
        };

        let mut messages = Vec::new();
        for effect in effects {
            if let Some(message) = self.run_effect(host, effect) {
                messages.push(message);
            }
        }
        messages
    }

    fn run_effect(&mut self, host: &mut H, effect: OverlayEffect) -> Option<OverlayMessage> {
        let id = self.state.id;
        match effect {
            OverlayEffect::BeginSession => {
                self.registry.enter(id);
                self.session = Some(OverlaySession::new(id));
            }
            OverlayEffect::CaptureFocus => {
                if let Some(session) = self.session.as_mut() {
                    session.capture_focus(&*host);
                }
            }
            OverlayEffect::FocusInitialTarget => {
                let selector = self.state.config.initial_focus_selector.as_deref();
                let target = initial_focus_target(&*host, &self.root, selector);
                host.focus(&target);
            }
            OverlayEffect::ApplyBodyMarker => {
                if !host.has_body_class(OVERLAY_BODY_MARKER) {
                    host.add_body_class(OVERLAY_BODY_MARKER);
                }
            }
            OverlayEffect::LockScroll => self.registry.acquire_scroll_lock(host),
            OverlayEffect::HideBackground => {
                let others_open = self.registry.others_open(id);
                if let Some(session) = self.session.as_mut() {
                    session.hide_background(
                        host,
                        &self.root,
                        &self.state.config.aria_hidden_exempt,
                        others_open,
                    );
                }
            }
            OverlayEffect::ListenForKeys => {
                if let Some(session) = self.session.as_mut() {
                    session.listen(host, ListenerKind::KeyDown);
                }
            }
            OverlayEffect::ListenForClicks => {
                if let Some(session) = self.session.as_mut() {
                    session.listen(host, ListenerKind::PointerDown);
                }
            }
            OverlayEffect::TrackShow => {
                return Some(OverlayMessage::Analytics(analytics::overlay_show(
                    &self.state.config,
                )));
            }
            OverlayEffect::RevealBackground => {
                let others_open = self.registry.others_open(id);
                if let Some(session) = self.session.as_mut() {
                    if let Some(handoff) = self.registry.take_handoff(id) {
                        session.adopt(handoff);
                    }
                    // Closing beneath another overlay: the one above keeps the background hidden
                    // and inherits the focus restore target.
                    if let Some(above) = self.registry.above(id) {
                        self.registry.post_handoff(above, session.hand_off());
                    }
                    session.reveal_background(host, others_open);
                }
            }
            OverlayEffect::UnlockScroll => {
                if !self.registry.others_open(id) {
                    self.registry.release_scroll_lock(host);
                }
            }
            OverlayEffect::ClearBodyMarker => {
                if !self.registry.others_open(id) {
                    host.remove_body_class(OVERLAY_BODY_MARKER);
                }
            }
            OverlayEffect::StopListening => {
                if let Some(session) = self.session.as_mut() {
                    session.stop_listening(host);
                }
            }
            OverlayEffect::RestoreFocus => {
                if let Some(session) = self.session.as_mut() {
                    session.restore_focus(host);
                }
            }
            OverlayEffect::EndSession => {
                if let Some(session) = self.session.take() {
                    session.release(host);
                }
                self.registry.leave(id);
            }
            OverlayEffect::EmitClose(reason) => {
                return Some(OverlayMessage::CloseRequested(reason));
            }
        }
        None
    }
}

impl<H: DocumentHost> Drop for OverlayController<H> {
    fn drop(&mut self) {
        if self.session.is_some() {
            logging::warn!(
                "overlay {} dropped while open without unmount; document state leaked",
                self.state.id.0
            );
            self.registry.leave(self.state.id);
        }
    }
}
