use component_runtime::{
    parse_pagination_config, PageControl, PaginationConfig, PaginationController,
    PaginationMessage,
};
use platform_host::{AnalyticsEvent, AnalyticsSink};
use platform_host_web::ConsoleAnalyticsSink;

use super::*;

#[component]
/// Shared pagination primitive.
///
/// Renders nothing for a single page. Page buttons are native `<button>` elements, so Enter and
/// Space reach the same click handler as pointer activation. `config_json` takes a JSON attribute
/// payload that, when valid, replaces `config`.
pub fn Pagination(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] page: MaybeSignal<u32>,
    #[prop(into)] pages: MaybeSignal<u32>,
    #[prop(optional)] config: PaginationConfig,
    #[prop(optional, into)] config_json: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    on_page_select: Callback<u32>,
    #[prop(optional)] on_analytics: Option<Callback<AnalyticsEvent>>,
) -> impl IntoView {
    let config = resolve_config(config, config_json.as_deref(), parse_pagination_config);
    let controller = store_value(PaginationController::new(config));
    let nav_label = aria_label.unwrap_or_else(|| "Pagination".to_string());

    let select = move |control: PageControl| {
        let messages = controller.with_value(|controller| controller.activate(&control));
        for message in messages {
            match message {
                PaginationMessage::PageSelected(page) => on_page_select.call(page),
                PaginationMessage::Analytics(event) => match on_analytics {
                    Some(on_analytics) => on_analytics.call(event),
                    None => ConsoleAnalyticsSink.record(&event),
                },
            }
        }
    };

    move || {
        let controls =
            controller.with_value(|controller| controller.controls(page.get(), pages.get()));
        if controls.is_empty() {
            return ().into_view();
        }
        view! {
            <nav
                class=merge_layout_class("ui-pagination", layout_class)
                aria-label=nav_label.clone()
                data-ui-primitive="true"
                data-ui-kind="pagination"
            >
                <ul data-ui-slot="list">
                    {controls
                        .into_iter()
                        .map(move |control| render_control(control, select))
                        .collect_view()}
                </ul>
            </nav>
        }
        .into_view()
    }
}

fn render_control(control: PageControl, select: impl Fn(PageControl) + Copy + 'static) -> View {
    let (slot, text, current) = match &control {
        PageControl::Ellipsis => {
            return view! {
                <li data-ui-slot="ellipsis" aria-hidden="true">
                    <span>"..."</span>
                </li>
            }
            .into_view();
        }
        PageControl::Previous { .. } => ("previous", "Previous".to_string(), false),
        PageControl::Page { page, current, .. } => ("page", page.to_string(), *current),
        PageControl::LastPage { page, .. } => ("last-page", page.to_string(), false),
        PageControl::Next { .. } => ("next", "Next".to_string(), false),
    };
    let aria_label = control.aria_label().unwrap_or_default().to_string();
    let variant = if current {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Quiet
    };

    view! {
        <li data-ui-slot=slot>
            <Button
                ui_slot=slot
                size=ButtonSize::Sm
                variant=variant
                selected=current
                aria_label=aria_label
                aria_current=current.then_some("page")
                on_click=Callback::new(move |_| select(control.clone()))
            >
                {text}
            </Button>
        </li>
    }
    .into_view()
}
