//! Browser [`DocumentHost`] adapter over `web-sys`.
//!
//! Listener slots are backed by window-level event listeners that forward [`DocumentEvent`]s to a
//! dispatcher supplied by the owning component. The dispatcher's return value decides whether the
//! native default action is suppressed.

use std::{collections::BTreeMap, rc::Rc};

use platform_host::{
    DocumentEvent, DocumentHost, ElementDescriptor, ListenerId, ListenerKind, ScrollLock,
};
use wasm_bindgen::JsCast;

/// Callback receiving events from registered listener slots; returns `true` to consume.
pub type DocumentDispatcher = Rc<dyn Fn(DocumentEvent<web_sys::Element>) -> bool>;

/// Live browser document adapter.
pub struct WebDocumentHost {
    document: Option<web_sys::Document>,
    dispatcher: DocumentDispatcher,
    listeners: BTreeMap<ListenerId, leptos::leptos_dom::helpers::WindowListenerHandle>,
    next_listener: u64,
}

impl WebDocumentHost {
    /// Creates an adapter for the current window's document.
    pub fn new(dispatcher: DocumentDispatcher) -> Self {
        #[cfg(target_arch = "wasm32")]
        let document = web_sys::window().and_then(|window| window.document());
        #[cfg(not(target_arch = "wasm32"))]
        let document = None;

        Self {
            document,
            dispatcher,
            listeners: BTreeMap::new(),
            next_listener: 1,
        }
    }

    fn body(&self) -> Option<web_sys::HtmlElement> {
        self.document.as_ref().and_then(|document| document.body())
    }
}

fn describe(element: &web_sys::Element) -> ElementDescriptor {
    let contenteditable = element
        .get_attribute("contenteditable")
        .map(|value| value != "false")
        .unwrap_or(false);
    ElementDescriptor {
        tag: element.tag_name().to_ascii_lowercase(),
        input_type: element
            .get_attribute("type")
            .map(|value| value.to_ascii_lowercase()),
        has_href: element.has_attribute("href"),
        has_controls: element.has_attribute("controls"),
        tabindex: element
            .get_attribute("tabindex")
            .and_then(|value| value.trim().parse().ok()),
        contenteditable,
        disabled: element.has_attribute("disabled"),
        hidden: element.has_attribute("hidden"),
    }
}

impl DocumentHost for WebDocumentHost {
    type Element = web_sys::Element;

    fn active_element(&self) -> Option<web_sys::Element> {
        self.document
            .as_ref()
            .and_then(|document| document.active_element())
    }

    fn focus(&mut self, element: &web_sys::Element) -> bool {
        element
            .dyn_ref::<web_sys::HtmlElement>()
            .map(|element| element.focus().is_ok())
            .unwrap_or(false)
    }

    fn is_connected(&self, element: &web_sys::Element) -> bool {
        element.is_connected()
    }

    fn contains(&self, root: &web_sys::Element, target: &web_sys::Element) -> bool {
        root.contains(Some(target.as_ref()))
    }

    fn query_selector(&self, root: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn matches(&self, element: &web_sys::Element, selector: &str) -> bool {
        element.matches(selector).unwrap_or(false)
    }

    fn descendants(&self, root: &web_sys::Element) -> Vec<(web_sys::Element, ElementDescriptor)> {
        let Ok(nodes) = root.query_selector_all("*") else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(nodes.length() as usize);
        for index in 0..nodes.length() {
            let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let descriptor = describe(&element);
            out.push((element, descriptor));
        }
        out
    }

    fn top_level_nodes(&self) -> Vec<web_sys::Element> {
        let Some(body) = self.body() else {
            return Vec::new();
        };
        let children = body.children();
        (0..children.length())
            .filter_map(|index| children.item(index))
            .collect()
    }

    fn is_aria_hidden(&self, element: &web_sys::Element) -> bool {
        element.get_attribute("aria-hidden").as_deref() == Some("true")
    }

    fn set_aria_hidden(&mut self, element: &web_sys::Element, hidden: bool) {
        let _ = if hidden {
            element.set_attribute("aria-hidden", "true")
        } else {
            element.remove_attribute("aria-hidden")
        };
    }

    fn add_body_class(&mut self, class: &str) {
        if let Some(body) = self.body() {
            let _ = body.class_list().add_1(class);
        }
    }

    fn remove_body_class(&mut self, class: &str) {
        if let Some(body) = self.body() {
            let _ = body.class_list().remove_1(class);
        }
    }

    fn has_body_class(&self, class: &str) -> bool {
        self.body()
            .map(|body| body.class_list().contains(class))
            .unwrap_or(false)
    }

    fn lock_scroll(&mut self) -> ScrollLock {
        let Some(body) = self.body() else {
            return ScrollLock::default();
        };
        let style = body.style();
        let previous_overflow = style.get_property_value("overflow").unwrap_or_default();
        let _ = style.set_property("overflow", "hidden");
        ScrollLock { previous_overflow }
    }

    fn unlock_scroll(&mut self, lock: ScrollLock) {
        let Some(body) = self.body() else {
            return;
        };
        let style = body.style();
        let _ = if lock.previous_overflow.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", &lock.previous_overflow)
        };
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;

        let dispatcher = Rc::clone(&self.dispatcher);
        let handle = match kind {
            ListenerKind::KeyDown => {
                leptos::window_event_listener(leptos::ev::keydown, move |ev| {
                    let consumed = dispatcher(DocumentEvent::KeyDown {
                        key: ev.key(),
                        shift: ev.shift_key(),
                    });
                    if consumed {
                        ev.prevent_default();
                    }
                })
            }
            ListenerKind::PointerDown => {
                leptos::window_event_listener(leptos::ev::mousedown, move |ev| {
                    let target = ev
                        .target()
                        .and_then(|target| target.dyn_into::<web_sys::Element>().ok());
                    let consumed = dispatcher(DocumentEvent::PointerDown { target });
                    if consumed {
                        ev.prevent_default();
                    }
                })
            }
        };
        self.listeners.insert(id, handle);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if let Some(handle) = self.listeners.remove(&id) {
            handle.remove();
        }
    }
}
