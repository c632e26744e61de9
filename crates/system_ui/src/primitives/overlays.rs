use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use component_runtime::{
    parse_overlay_config, CloseReason, OverlayConfig, OverlayController, OverlayMessage,
};
use platform_host::{AnalyticsEvent, AnalyticsSink, DocumentEvent};
use platform_host_web::{ConsoleAnalyticsSink, DocumentDispatcher, WebDocumentHost};

use super::*;

/// Glue between one mounted [`Modal`] and its overlay controller.
///
/// Window listeners call back into the binding through a weak handle, so the binding is dropped
/// with the component scope even while listeners are registered.
struct ModalBinding {
    config: OverlayConfig,
    host: RefCell<WebDocumentHost>,
    controller: RefCell<Option<OverlayController<WebDocumentHost>>>,
    open: RwSignal<bool>,
    on_close: Option<Callback<CloseReason>>,
    on_analytics: Option<Callback<AnalyticsEvent>>,
}

impl ModalBinding {
    fn new(
        config: OverlayConfig,
        on_close: Option<Callback<CloseReason>>,
        on_analytics: Option<Callback<AnalyticsEvent>>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let dispatcher: DocumentDispatcher = Rc::new(move |event| {
                weak.upgrade()
                    .map(|binding| binding.handle_event(event))
                    .unwrap_or(false)
            });
            Self {
                config,
                host: RefCell::new(WebDocumentHost::new(dispatcher)),
                controller: RefCell::new(None),
                open: create_rw_signal(false),
                on_close,
                on_analytics,
            }
        })
    }

    fn set_visible(&self, root: web_sys::Element, visible: bool) {
        let messages = {
            let (Ok(mut controller), Ok(mut host)) =
                (self.controller.try_borrow_mut(), self.host.try_borrow_mut())
            else {
                logging::warn!("modal visibility change skipped: binding busy");
                return;
            };
            // Shown before the controller opens so the initial focus target is focusable;
            // `deliver` settles the flag on the controller's resulting phase.
            if visible && !self.open.get_untracked() {
                self.open.set(true);
            }
            let controller = controller
                .get_or_insert_with(|| OverlayController::new(root, self.config.clone()));
            controller.set_visible(&mut host, visible)
        };
        self.deliver(messages);
    }

    fn close_button(&self) {
        let messages = self.with_controller(|controller, host| controller.close_button(host));
        self.deliver(messages.unwrap_or_default());
    }

    fn unmount(&self) {
        let messages = self.with_controller(|controller, host| controller.unmount(host));
        self.deliver(messages.unwrap_or_default());
    }

    fn handle_event(&self, event: DocumentEvent<web_sys::Element>) -> bool {
        let Some(outcome) =
            self.with_controller(|controller, host| controller.handle_event(host, event))
        else {
            return false;
        };
        self.deliver(outcome.messages);
        outcome.consumed
    }

    fn with_controller<T>(
        &self,
        f: impl FnOnce(&mut OverlayController<WebDocumentHost>, &mut WebDocumentHost) -> T,
    ) -> Option<T> {
        let (Ok(mut controller), Ok(mut host)) =
            (self.controller.try_borrow_mut(), self.host.try_borrow_mut())
        else {
            logging::warn!("modal event skipped: binding busy");
            return None;
        };
        let controller = controller.as_mut()?;
        Some(f(controller, &mut host))
    }

    // Runs after every borrow is released so owner callbacks may toggle visibility.
    fn deliver(&self, messages: Vec<OverlayMessage>) {
        if let Ok(controller) = self.controller.try_borrow() {
            let open = controller.as_ref().is_some_and(|controller| controller.is_open());
            if self.open.get_untracked() != open {
                self.open.set(open);
            }
        }
        for message in messages {
            match message {
                OverlayMessage::CloseRequested(reason) => {
                    if let Some(on_close) = self.on_close {
                        on_close.call(reason);
                    }
                }
                OverlayMessage::Analytics(event) => match self.on_analytics {
                    Some(on_analytics) => on_analytics.call(event),
                    None => ConsoleAnalyticsSink.record(&event),
                },
            }
        }
    }
}

#[component]
/// Shared modal dialog primitive.
///
/// The owner controls `visible`. Escape, outside clicks (when `config.click_to_close` is set),
/// and the close button run the close transition themselves and report a [`CloseReason`]
/// through `on_close`; the owner is expected to flip `visible` back to `false`.
///
/// The dialog is portalled to the end of `<body>` so the rest of the page, including the
/// application shell it was declared in, can be hidden from assistive technology while open.
/// `config_json` takes a JSON attribute payload that, when valid, replaces `config`.
pub fn Modal(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] visible: MaybeSignal<bool>,
    #[prop(optional)] config: OverlayConfig,
    #[prop(optional, into)] config_json: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] on_close: Option<Callback<CloseReason>>,
    #[prop(optional)] on_primary: Option<Callback<MouseEvent>>,
    #[prop(optional)] on_secondary: Option<Callback<MouseEvent>>,
    #[prop(optional)] on_analytics: Option<Callback<AnalyticsEvent>>,
    children: ChildrenFn,
) -> impl IntoView {
    let config = resolve_config(config, config_json.as_deref(), parse_overlay_config);
    let title = config.title.clone();
    let status = config.status.clone();
    let primary_text = config.primary_button_text.clone();
    let secondary_text = config.secondary_button_text.clone();
    let hide_close_button = config.hide_close_button;
    let has_actions = primary_text.is_some() || secondary_text.is_some();

    let binding = ModalBinding::new(config, on_close, on_analytics);
    let root_ref = create_node_ref::<html::Div>();
    let open = binding.open;

    {
        let binding = Rc::clone(&binding);
        create_effect(move |_| {
            let visible = visible.get();
            let Some(root) = root_ref.get() else {
                return;
            };
            let root: web_sys::Element = (*root).clone().into();
            binding.set_visible(root, visible);
        });
    }
    let close = {
        let binding = Rc::clone(&binding);
        Callback::new(move |_: MouseEvent| binding.close_button())
    };
    on_cleanup(move || binding.unmount());

    let primary = Callback::new(move |ev| {
        if let Some(on_primary) = on_primary {
            on_primary.call(ev);
        }
    });
    let secondary = Callback::new(move |ev| {
        if let Some(on_secondary) = on_secondary {
            on_secondary.call(ev);
        }
    });

    view! {
        <Portal>
            <div
                node_ref=root_ref
                class=merge_layout_class("ui-modal", layout_class)
                role="dialog"
                aria-modal="true"
                aria-label=aria_label.clone()
                tabindex="-1"
                hidden=move || !open.get()
                data-ui-primitive="true"
                data-ui-kind="modal"
                data-ui-status=status.clone()
                data-ui-state=move || if open.get() { "open" } else { "closed" }
            >
                <div data-ui-slot="surface">
                    {(!hide_close_button).then(|| view! {
                        <Button
                            layout_class="ui-modal-close"
                            ui_slot="close"
                            variant=ButtonVariant::Quiet
                            aria_label="Close this modal".to_string()
                            on_click=close
                        >
                            "×"
                        </Button>
                    })}
                    {title.clone().map(|title| view! { <h2 data-ui-slot="title">{title}</h2> })}
                    <div data-ui-slot="body">{children()}</div>
                    {has_actions.then(|| view! {
                        <div data-ui-slot="actions">
                            {primary_text.clone().map(|text| view! {
                                <Button ui_slot="primary" variant=ButtonVariant::Primary on_click=primary>
                                    {text}
                                </Button>
                            })}
                            {secondary_text.clone().map(|text| view! {
                                <Button
                                    ui_slot="secondary"
                                    variant=ButtonVariant::Secondary
                                    on_click=secondary
                                >
                                    {text}
                                </Button>
                            })}
                        </div>
                    })}
                </div>
            </div>
        </Portal>
    }
}
