//! Process-wide record of open overlays and the shared document resources they hold.

use std::{any::Any, cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use platform_host::{DocumentHost, ScrollLock};

use super::session::Handoff;
use crate::model::OverlayId;

#[derive(Default)]
struct RegistryInner {
    stack: Vec<OverlayId>,
    scroll_lock: Option<ScrollLock>,
    next_id: u64,
    // Keyed by recipient; values are `Handoff<E>` for the host's element type.
    handoffs: BTreeMap<OverlayId, Box<dyn Any>>,
}

impl fmt::Debug for RegistryInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryInner")
            .field("stack", &self.stack)
            .field("scroll_lock", &self.scroll_lock)
            .field("next_id", &self.next_id)
            .field("handoffs", &self.handoffs.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
/// Stack of open overlays, innermost last.
///
/// Shared resources (body scroll lock, body marker) stay acquired while any entry remains; only
/// the topmost entry reacts to dismissal input.
pub struct OverlayRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl OverlayRegistry {
    /// Allocates a fresh overlay id.
    pub fn allocate_id(&self) -> OverlayId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        OverlayId(inner.next_id)
    }

    /// Ids of open overlays, outermost first.
    pub fn open_ids(&self) -> Vec<OverlayId> {
        self.inner.borrow().stack.clone()
    }

    /// Whether no overlay is open.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().stack.is_empty()
    }

    /// Whether `id` is the innermost open overlay.
    pub fn is_topmost(&self, id: OverlayId) -> bool {
        self.inner.borrow().stack.last() == Some(&id)
    }

    /// Whether any overlay other than `id` is open.
    pub fn others_open(&self, id: OverlayId) -> bool {
        self.inner.borrow().stack.iter().any(|open| *open != id)
    }

    /// Whether the shared scroll lock is held.
    pub fn scroll_locked(&self) -> bool {
        self.inner.borrow().scroll_lock.is_some()
    }

    pub(crate) fn enter(&self, id: OverlayId) {
        let mut inner = self.inner.borrow_mut();
        if !inner.stack.contains(&id) {
            inner.stack.push(id);
        }
    }

    pub(crate) fn leave(&self, id: OverlayId) {
        let mut inner = self.inner.borrow_mut();
        inner.stack.retain(|open| *open != id);
        inner.handoffs.remove(&id);
    }

    /// Overlay stacked directly above `id`, if any.
    pub(crate) fn above(&self, id: OverlayId) -> Option<OverlayId> {
        let inner = self.inner.borrow();
        let position = inner.stack.iter().position(|open| *open == id)?;
        inner.stack.get(position + 1).copied()
    }

    pub(crate) fn post_handoff<E>(&self, to: OverlayId, handoff: Handoff<E>)
    where
        E: PartialEq + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let pending = inner
            .handoffs
            .remove(&to)
            .and_then(|pending| pending.downcast::<Handoff<E>>().ok());
        let merged = match pending {
            Some(mut pending) => {
                pending.absorb(handoff);
                pending
            }
            None => Box::new(handoff),
        };
        inner.handoffs.insert(to, merged);
    }

    pub(crate) fn take_handoff<E: 'static>(&self, id: OverlayId) -> Option<Handoff<E>> {
        let pending = self.inner.borrow_mut().handoffs.remove(&id)?;
        pending.downcast::<Handoff<E>>().ok().map(|handoff| *handoff)
    }

    pub(crate) fn acquire_scroll_lock<H: DocumentHost>(&self, host: &mut H) {
        let mut inner = self.inner.borrow_mut();
        if inner.scroll_lock.is_none() {
            inner.scroll_lock = Some(host.lock_scroll());
        }
    }

    pub(crate) fn release_scroll_lock<H: DocumentHost>(&self, host: &mut H) {
        let lock = self.inner.borrow_mut().scroll_lock.take();
        if let Some(lock) = lock {
            host.unlock_scroll(lock);
        }
    }
}

thread_local! {
    static GLOBAL_OVERLAY_REGISTRY: OverlayRegistry = OverlayRegistry::default();
}

/// Returns the process-local overlay registry.
pub fn overlay_registry() -> OverlayRegistry {
    GLOBAL_OVERLAY_REGISTRY.with(|registry| registry.clone())
}

#[cfg(test)]
mod tests {
    use platform_host::{MemoryDocument, NodeId};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn stack_tracks_topmost_and_ignores_duplicate_entries() {
        let registry = OverlayRegistry::default();
        let outer = registry.allocate_id();
        let inner = registry.allocate_id();

        registry.enter(outer);
        registry.enter(inner);
        registry.enter(inner);

        assert_eq!(registry.open_ids(), vec![outer, inner]);
        assert!(registry.is_topmost(inner));
        assert!(registry.others_open(inner));

        registry.leave(inner);
        assert!(registry.is_topmost(outer));
        assert!(!registry.others_open(outer));
    }

    #[test]
    fn scroll_lock_is_acquired_once_and_restores_original_overflow() {
        let registry = OverlayRegistry::default();
        let mut doc = MemoryDocument::new();
        doc.set_body_overflow("scroll");

        registry.acquire_scroll_lock(&mut doc);
        registry.acquire_scroll_lock(&mut doc);
        assert!(registry.scroll_locked());
        assert_eq!(doc.body_overflow(), "hidden");

        registry.release_scroll_lock(&mut doc);
        assert_eq!(doc.body_overflow(), "scroll");
        assert!(!registry.scroll_locked());
    }

    #[test]
    fn handoffs_merge_per_recipient_and_are_dropped_on_leave() {
        let registry = OverlayRegistry::default();
        let lower = registry.allocate_id();
        let middle = registry.allocate_id();
        let top = registry.allocate_id();
        for id in [lower, middle, top] {
            registry.enter(id);
        }
        assert_eq!(registry.above(lower), Some(middle));
        assert_eq!(registry.above(top), None);

        registry.post_handoff(
            top,
            Handoff {
                previous_focus: Some(NodeId(4)),
                hidden: vec![NodeId(1)],
            },
        );
        registry.post_handoff(
            top,
            Handoff {
                previous_focus: Some(NodeId(2)),
                hidden: vec![NodeId(1), NodeId(3)],
            },
        );
        let merged = registry.take_handoff::<NodeId>(top).expect("pending handoff");
        assert_eq!(merged.previous_focus, Some(NodeId(2)));
        assert_eq!(merged.hidden, vec![NodeId(1), NodeId(3)]);
        assert!(registry.take_handoff::<NodeId>(top).is_none());

        registry.post_handoff(
            top,
            Handoff {
                previous_focus: None,
                hidden: vec![NodeId(5)],
            },
        );
        registry.leave(top);
        assert!(registry.take_handoff::<NodeId>(top).is_none());
    }

    #[test]
    fn global_registry_handles_share_state() {
        let first = overlay_registry();
        let second = overlay_registry();
        let id = first.allocate_id();

        first.enter(id);
        assert!(second.is_topmost(id));
        second.leave(id);
        assert!(!first.is_topmost(id));
    }
}
