//! Document-level host contract mutated by overlay controllers.
//!
//! The trait abstracts the handful of global DOM operations an overlay needs (focus, body marker
//! class, background `aria-hidden` bookkeeping, scroll locking, and document listener slots) so
//! the transition logic can run against a browser document or an in-memory model alike.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Opaque handle for a registered document listener slot.
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Document listener slots an overlay can hold.
pub enum ListenerKind {
    /// Keyboard listener (Escape dismissal, Tab wrapping).
    KeyDown,
    /// Pointer-down listener used for outside-click dismissal.
    PointerDown,
}

#[derive(Debug, Clone, PartialEq)]
/// Events delivered from a registered document listener back to its owner.
pub enum DocumentEvent<E> {
    /// A key was pressed while the listener was registered.
    KeyDown {
        /// `KeyboardEvent.key` value.
        key: String,
        /// Whether Shift was held.
        shift: bool,
    },
    /// A pointer went down somewhere in the document.
    PointerDown {
        /// Element that received the pointer, when resolvable.
        target: Option<E>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Element facts needed to decide focusability without sniffing the live DOM.
pub struct ElementDescriptor {
    /// Lower-case tag name.
    pub tag: String,
    /// `type` attribute for inputs.
    pub input_type: Option<String>,
    /// Whether an `href` attribute is present.
    pub has_href: bool,
    /// Whether a `controls` attribute is present (media elements).
    pub has_controls: bool,
    /// Parsed `tabindex` attribute.
    pub tabindex: Option<i32>,
    /// Whether the element is content-editable.
    pub contenteditable: bool,
    /// Whether the element is disabled.
    pub disabled: bool,
    /// Whether the element carries the `hidden` attribute.
    pub hidden: bool,
}

impl ElementDescriptor {
    /// Creates a descriptor for `tag` with no other attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Body scroll state captured when background scrolling is locked.
pub struct ScrollLock {
    /// Inline `overflow` value on the body before locking (empty when unset).
    pub previous_overflow: String,
}

/// Global document operations required by overlay surfaces.
///
/// Implementations must treat every method as infallible from the caller's point of view: a
/// missing document or a detached element degrades to a no-op or a `false`/`None` result.
pub trait DocumentHost {
    /// Element handle type.
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    /// Returns the currently focused element.
    fn active_element(&self) -> Option<Self::Element>;

    /// Moves focus to `element`, reporting whether focus was applied.
    fn focus(&mut self, element: &Self::Element) -> bool;

    /// Returns whether `element` is still attached to the document.
    fn is_connected(&self, element: &Self::Element) -> bool;

    /// Returns whether `target` is `root` or one of its descendants.
    fn contains(&self, root: &Self::Element, target: &Self::Element) -> bool;

    /// Finds the first descendant of `root` matching `selector`.
    fn query_selector(&self, root: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// Returns whether `element` matches `selector`.
    fn matches(&self, element: &Self::Element, selector: &str) -> bool;

    /// Lists descendants of `root` in document order with their focusability facts.
    fn descendants(&self, root: &Self::Element) -> Vec<(Self::Element, ElementDescriptor)>;

    /// Lists the direct children of the document body.
    fn top_level_nodes(&self) -> Vec<Self::Element>;

    /// Returns whether `element` is hidden from assistive technology.
    fn is_aria_hidden(&self, element: &Self::Element) -> bool;

    /// Sets or clears `aria-hidden="true"` on `element`.
    fn set_aria_hidden(&mut self, element: &Self::Element, hidden: bool);

    /// Adds a class to the body element.
    fn add_body_class(&mut self, class: &str);

    /// Removes a class from the body element.
    fn remove_body_class(&mut self, class: &str);

    /// Returns whether the body element carries `class`.
    fn has_body_class(&self, class: &str) -> bool;

    /// Prevents the page behind overlays from scrolling.
    fn lock_scroll(&mut self) -> ScrollLock;

    /// Restores body scrolling captured by [`DocumentHost::lock_scroll`].
    fn unlock_scroll(&mut self, lock: ScrollLock);

    /// Registers a document listener slot.
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Releases a listener slot. Unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);
}
