//! Per-open record of everything an overlay acquired and must give back on close.

use leptos::logging;
use platform_host::{DocumentHost, ListenerId, ListenerKind};

use crate::model::OverlayId;

#[derive(Debug)]
/// What a session closing beneath another open overlay passes up the stack instead of releasing.
pub(crate) struct Handoff<E> {
    pub(crate) previous_focus: Option<E>,
    pub(crate) hidden: Vec<E>,
}

impl<E: PartialEq> Handoff<E> {
    /// Folds a handoff from a session lower in the stack into this one.
    pub(crate) fn absorb(&mut self, lower: Handoff<E>) {
        if lower.previous_focus.is_some() {
            self.previous_focus = lower.previous_focus;
        }
        for node in lower.hidden {
            if !self.hidden.contains(&node) {
                self.hidden.push(node);
            }
        }
    }
}

#[derive(Debug)]
/// State acquired by one open overlay.
///
/// Created by the open sequence and consumed by [`OverlaySession::release`]; every undo step
/// drains what it restores, so running one twice is harmless.
pub struct OverlaySession<E> {
    id: OverlayId,
    previous_focus: Option<E>,
    hidden: Vec<E>,
    exposed: Option<E>,
    listeners: Vec<(ListenerKind, ListenerId)>,
}

impl<E: Clone + PartialEq> OverlaySession<E> {
    pub(crate) fn new(id: OverlayId) -> Self {
        Self {
            id,
            previous_focus: None,
            hidden: Vec::new(),
            exposed: None,
            listeners: Vec::new(),
        }
    }

    /// Owning overlay id.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Element focused before the overlay opened.
    pub fn previous_focus(&self) -> Option<&E> {
        self.previous_focus.as_ref()
    }

    /// Nodes this session hid from assistive technology.
    pub fn hidden_nodes(&self) -> &[E] {
        &self.hidden
    }

    /// Whether a listener of `kind` is registered.
    pub fn listens_for(&self, kind: ListenerKind) -> bool {
        self.listeners.iter().any(|(registered, _)| *registered == kind)
    }

    pub(crate) fn capture_focus<H>(&mut self, host: &H)
    where
        H: DocumentHost<Element = E>,
    {
        if self.previous_focus.is_none() {
            self.previous_focus = host.active_element();
        }
    }

    /// Hides every top-level node except the one holding `root` and exempted nodes.
    ///
    /// When another overlay is already open, the node holding `root` may have been hidden by it;
    /// that node is exposed for the lifetime of this session.
    pub(crate) fn hide_background<H>(
        &mut self,
        host: &mut H,
        root: &E,
        exempt: &[String],
        others_open: bool,
    ) where
        H: DocumentHost<Element = E>,
    {
        for node in host.top_level_nodes() {
            if host.contains(&node, root) {
                if others_open && host.is_aria_hidden(&node) {
                    host.set_aria_hidden(&node, false);
                    self.exposed = Some(node);
                }
                continue;
            }
            if host.is_aria_hidden(&node) {
                continue;
            }
            if exempt.iter().any(|selector| host.matches(&node, selector)) {
                continue;
            }
            host.set_aria_hidden(&node, true);
            self.hidden.push(node);
        }
    }

    pub(crate) fn reveal_background<H>(&mut self, host: &mut H, others_open: bool)
    where
        H: DocumentHost<Element = E>,
    {
        for node in self.hidden.drain(..) {
            host.set_aria_hidden(&node, false);
        }
        if let Some(node) = self.exposed.take() {
            if others_open {
                host.set_aria_hidden(&node, true);
            }
        }
    }

    /// Gives up the focus restore target and hidden nodes for the overlay stacked above.
    pub(crate) fn hand_off(&mut self) -> Handoff<E> {
        Handoff {
            previous_focus: self.previous_focus.take(),
            hidden: std::mem::take(&mut self.hidden),
        }
    }

    /// Takes over what a session closed beneath this one left behind.
    ///
    /// The lower session's focus target predates this overlay, so it replaces the captured one.
    pub(crate) fn adopt(&mut self, handoff: Handoff<E>) {
        let mut own = self.hand_off();
        own.absorb(handoff);
        self.previous_focus = own.previous_focus;
        self.hidden = own.hidden;
    }

    pub(crate) fn listen<H>(&mut self, host: &mut H, kind: ListenerKind)
    where
        H: DocumentHost<Element = E>,
    {
        if self.listens_for(kind) {
            return;
        }
        let id = host.add_listener(kind);
        self.listeners.push((kind, id));
    }

    pub(crate) fn stop_listening<H>(&mut self, host: &mut H)
    where
        H: DocumentHost<Element = E>,
    {
        for (_, id) in self.listeners.drain(..) {
            host.remove_listener(id);
        }
    }

    pub(crate) fn restore_focus<H>(&mut self, host: &mut H)
    where
        H: DocumentHost<Element = E>,
    {
        let Some(previous) = self.previous_focus.take() else {
            return;
        };
        if !host.is_connected(&previous) {
            logging::warn!(
                "overlay {} focus restore skipped: previous element detached",
                self.id.0
            );
            return;
        }
        host.focus(&previous);
    }

    /// Gives back anything the close sequence did not already release.
    pub(crate) fn release<H>(mut self, host: &mut H)
    where
        H: DocumentHost<Element = E>,
    {
        self.reveal_background(host, false);
        self.stop_listening(host);
    }
}
