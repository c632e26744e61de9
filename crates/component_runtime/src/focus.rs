//! Focusable-element capability set and overlay focus target resolution.

use leptos::logging;
use platform_host::{DocumentHost, ElementDescriptor};

/// Tags that are focusable without further attributes unless disabled.
pub const FOCUSABLE_TAGS: &[&str] = &["button", "input", "select", "textarea", "iframe", "summary"];
/// Tags that are focusable only with an `href`.
pub const FOCUSABLE_LINK_TAGS: &[&str] = &["a", "area"];
/// Media tags that are focusable only when native controls are shown.
pub const FOCUSABLE_MEDIA_TAGS: &[&str] = &["audio", "video"];

/// Returns whether an element can receive keyboard focus in sequential navigation.
pub fn is_focusable(element: &ElementDescriptor) -> bool {
    if element.hidden || element.disabled {
        return false;
    }
    if element.tabindex.is_some_and(|index| index < 0) {
        return false;
    }
    if element.tag == "input" && element.input_type.as_deref() == Some("hidden") {
        return false;
    }

    let tag = element.tag.as_str();
    FOCUSABLE_TAGS.contains(&tag)
        || (FOCUSABLE_LINK_TAGS.contains(&tag) && element.has_href)
        || (FOCUSABLE_MEDIA_TAGS.contains(&tag) && element.has_controls)
        || element.contenteditable
        || element.tabindex.is_some()
}

/// Focusable descendants of `root` in document order.
pub fn focusable_descendants<H: DocumentHost>(host: &H, root: &H::Element) -> Vec<H::Element> {
    host.descendants(root)
        .into_iter()
        .filter(|(_, descriptor)| is_focusable(descriptor))
        .map(|(element, _)| element)
        .collect()
}

/// Resolves the element that should receive focus when an overlay opens.
///
/// A configured selector wins when it matches; otherwise the first focusable descendant, and
/// finally the overlay root itself.
pub fn initial_focus_target<H: DocumentHost>(
    host: &H,
    root: &H::Element,
    selector: Option<&str>,
) -> H::Element {
    if let Some(selector) = selector.filter(|selector| !selector.trim().is_empty()) {
        if let Some(found) = host.query_selector(root, selector) {
            return found;
        }
        logging::warn!("overlay initial focus selector `{selector}` matched nothing");
    }

    focusable_descendants(host, root)
        .into_iter()
        .next()
        .unwrap_or_else(|| root.clone())
}
