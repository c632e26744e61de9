//! Pagination range computation, render-ordered controls, and page selection.

use platform_host::AnalyticsEvent;
use serde::{Deserialize, Serialize};

use crate::analytics;
use crate::model::{PaginationConfig, PaginationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Semantic navigation identifiers reported with page selections.
pub enum PaginateAction {
    /// A numbered page (including the last-page shortcut) was selected.
    #[serde(rename = "nav-paginate-number")]
    Number,
    /// The previous-page control was selected.
    #[serde(rename = "nav-paginate-previous")]
    Previous,
    /// The next-page control was selected.
    #[serde(rename = "nav-paginate-next")]
    Next,
}

impl PaginateAction {
    /// Tracking identifier for the action.
    pub fn event_id(self) -> &'static str {
        match self {
            Self::Number => "nav-paginate-number",
            Self::Previous => "nav-paginate-previous",
            Self::Next => "nav-paginate-next",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Derived render model for one pagination request.
pub struct PaginationModel {
    /// Current page after input normalization.
    pub current: u32,
    /// Total pages after input normalization.
    pub total: u32,
    /// Contiguous run of page numbers to render.
    pub window: Vec<u32>,
    /// Whether the previous-page control renders.
    pub show_previous: bool,
    /// Whether the next-page control renders.
    pub show_next: bool,
    /// Last-page shortcut rendered after an ellipsis, when reserved.
    pub last_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One rendered pagination control.
pub enum PageControl {
    /// Previous-page control.
    Previous {
        /// Page selected by the control.
        target: u32,
        /// Accessible label.
        aria_label: String,
    },
    /// Numbered page control.
    Page {
        /// Page number.
        page: u32,
        /// Whether this is the current page (`aria-current="page"`).
        current: bool,
        /// Accessible label.
        aria_label: String,
    },
    /// Non-interactive gap marker before the last-page shortcut.
    Ellipsis,
    /// Last-page shortcut.
    LastPage {
        /// Final page number.
        page: u32,
        /// Accessible label.
        aria_label: String,
    },
    /// Next-page control.
    Next {
        /// Page selected by the control.
        target: u32,
        /// Accessible label.
        aria_label: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A resolved "select page N" action.
pub struct PageSelection {
    /// Page to navigate to.
    pub page: u32,
    /// Semantic identifier of the control that produced the selection.
    pub action: PaginateAction,
}

impl PageControl {
    /// Resolves the control to a page selection. The ellipsis marker selects nothing.
    pub fn select(&self) -> Option<PageSelection> {
        match self {
            Self::Previous { target, .. } => Some(PageSelection {
                page: *target,
                action: PaginateAction::Previous,
            }),
            Self::Page { page, .. } | Self::LastPage { page, .. } => Some(PageSelection {
                page: *page,
                action: PaginateAction::Number,
            }),
            Self::Next { target, .. } => Some(PageSelection {
                page: *target,
                action: PaginateAction::Next,
            }),
            Self::Ellipsis => None,
        }
    }

    /// Accessible label, absent for the ellipsis marker.
    pub fn aria_label(&self) -> Option<&str> {
        match self {
            Self::Previous { aria_label, .. }
            | Self::Page { aria_label, .. }
            | Self::LastPage { aria_label, .. }
            | Self::Next { aria_label, .. } => Some(aria_label),
            Self::Ellipsis => None,
        }
    }
}

/// Returns whether `key` activates a focused pagination control.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

// The last page sits outside the naturally visible window.
fn reserves_last_page(request: &PaginationRequest) -> bool {
    request.show_last_page
        && request
            .current_page
            .saturating_add(request.max_page_list_length)
            <= request.total_pages
}

/// Computes the render model for `request`, or `None` when the control should not render.
///
/// Out-of-range input is normalized first (see [`PaginationRequest::normalized`]).
pub fn paginate(request: &PaginationRequest) -> Option<PaginationModel> {
    let request = request.normalized();
    let PaginationRequest {
        current_page: current,
        total_pages: total,
        max_page_list_length: max_len,
        ..
    } = request;
    if total == 1 {
        return None;
    }

    let reserve = reserves_last_page(&request);
    let window_limit = if reserve {
        max_len.saturating_sub(2).max(1)
    } else {
        max_len
    };

    let window = if total <= window_limit {
        (1..=total).collect()
    } else {
        let pinned_start = total - window_limit + 1;
        let start = if current >= pinned_start {
            pinned_start
        } else {
            current
        };
        (start..start + window_limit).collect()
    };

    Some(PaginationModel {
        current,
        total,
        window,
        show_previous: current > 1,
        show_next: total > current,
        last_page: reserve.then_some(total),
    })
}

fn label(base: String, suffix: &str) -> String {
    let suffix = suffix.trim();
    if suffix.is_empty() {
        base
    } else {
        format!("{base} {suffix}")
    }
}

impl PaginationModel {
    /// Controls in render order: previous, page window, ellipsis and last page, next.
    pub fn controls(&self, aria_label_suffix: &str) -> Vec<PageControl> {
        let mut controls = Vec::with_capacity(self.window.len() + 4);
        if self.show_previous {
            controls.push(PageControl::Previous {
                target: self.current - 1,
                aria_label: label("Previous page".to_string(), aria_label_suffix),
            });
        }
        controls.extend(self.window.iter().map(|page| PageControl::Page {
            page: *page,
            current: *page == self.current,
            aria_label: label(format!("Page {page}"), aria_label_suffix),
        }));
        if let Some(last) = self.last_page {
            controls.push(PageControl::Ellipsis);
            controls.push(PageControl::LastPage {
                page: last,
                aria_label: label(format!("Page {last}"), aria_label_suffix),
            });
        }
        if self.show_next {
            controls.push(PageControl::Next {
                target: self.current + 1,
                aria_label: label("Next page".to_string(), aria_label_suffix),
            });
        }
        controls
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Outbound messages produced by a page selection.
pub enum PaginationMessage {
    /// The owner should navigate to this page.
    PageSelected(u32),
    /// Tracking event for the selection.
    Analytics(AnalyticsEvent),
}

#[derive(Debug, Clone, Default)]
/// Routes pointer and keyboard activation of pagination controls through one selection path.
pub struct PaginationController {
    config: PaginationConfig,
}

impl PaginationController {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Builds the request for the current `page`/`pages` props.
    pub fn request(&self, page: u32, pages: u32) -> PaginationRequest {
        PaginationRequest::from_config(page, pages, &self.config)
    }

    /// Render model for the current props.
    pub fn model(&self, page: u32, pages: u32) -> Option<PaginationModel> {
        paginate(&self.request(page, pages))
    }

    /// Render-ordered controls for the current props; empty when the control is suppressed.
    pub fn controls(&self, page: u32, pages: u32) -> Vec<PageControl> {
        self.model(page, pages)
            .map(|model| model.controls(&self.config.aria_label_suffix))
            .unwrap_or_default()
    }

    /// Pointer activation of `control`.
    pub fn activate(&self, control: &PageControl) -> Vec<PaginationMessage> {
        let Some(selection) = control.select() else {
            return Vec::new();
        };
        let mut messages = vec![PaginationMessage::PageSelected(selection.page)];
        if !self.config.disable_analytics {
            messages.push(PaginationMessage::Analytics(analytics::paginate(
                &self.config.component_name,
                selection.action,
                selection.page,
            )));
        }
        messages
    }

    /// Keyboard activation of `control`; non-activation keys produce nothing.
    pub fn activate_with_key(&self, control: &PageControl, key: &str) -> Vec<PaginationMessage> {
        if !is_activation_key(key) {
            return Vec::new();
        }
        self.activate(control)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn window(current: u32, total: u32, max_len: u32, show_last: bool) -> Option<PaginationModel> {
        paginate(
            &PaginationRequest::new(current, total)
                .with_max_page_list_length(max_len)
                .with_show_last_page(show_last),
        )
    }

    #[test]
    fn window_is_contiguous_contains_current_and_stays_in_range() {
        for total in 2..=40u32 {
            for max_len in 1..=12u32 {
                for show_last in [false, true] {
                    for current in 1..=total {
                        let model = window(current, total, max_len, show_last).expect("rendered");
                        let limit = if model.last_page.is_some() {
                            max_len.saturating_sub(2).max(1)
                        } else {
                            max_len
                        };

                        assert_eq!(model.window.len() as u32, total.min(limit));
                        assert!(model.window.windows(2).all(|pair| pair[1] == pair[0] + 1));
                        assert!(model.window.contains(&current));
                        assert!(model.window[0] >= 1);
                        assert!(*model.window.last().expect("non-empty") <= total);
                    }
                }
            }
        }
    }

    #[test]
    fn window_pins_to_final_pages_near_the_end() {
        let model = window(18, 20, 10, false).expect("rendered");
        assert_eq!(model.window, (11..=20).collect::<Vec<_>>());
        assert!(model.show_previous);
        assert!(model.show_next);
    }

    #[test]
    fn window_starts_at_current_page_before_the_pin_threshold() {
        let model = window(4, 20, 10, false).expect("rendered");
        assert_eq!(model.window, (4..=13).collect::<Vec<_>>());

        let model = window(11, 20, 10, false).expect("rendered");
        assert_eq!(model.window, (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_shortcut_reserves_two_slots_until_the_end_is_visible() {
        let model = window(5, 100, 10, true).expect("rendered");
        assert_eq!(model.window, (5..=12).collect::<Vec<_>>());
        assert_eq!(model.last_page, Some(100));

        let model = window(95, 100, 10, true).expect("rendered");
        assert_eq!(model.window, (91..=100).collect::<Vec<_>>());
        assert_eq!(model.last_page, None);

        let model = window(91, 100, 10, true).expect("rendered");
        assert_eq!(model.last_page, None);
        let model = window(90, 100, 10, true).expect("rendered");
        assert_eq!(model.last_page, Some(100));
    }

    #[test]
    fn small_page_counts_render_every_page() {
        let model = window(3, 6, 10, true).expect("rendered");
        assert_eq!(model.window, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(model.last_page, None);
    }

    #[test]
    fn single_page_suppresses_the_control() {
        assert_eq!(window(1, 1, 10, true), None);
        assert_eq!(window(1, 1, 1, false), None);
        assert!(PaginationController::default().controls(1, 1).is_empty());
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let model = window(0, 5, 10, false).expect("rendered");
        assert_eq!(model.current, 1);
        assert!(!model.show_previous);

        let model = window(9, 5, 10, false).expect("rendered");
        assert_eq!(model.current, 5);
        assert!(!model.show_next);

        assert_eq!(window(3, 0, 10, false), None);
        assert_eq!(window(2, 4, 0, false).expect("rendered").window, vec![2]);
    }

    #[test]
    fn tiny_list_length_keeps_one_window_page_beside_the_last_page_shortcut() {
        for max_len in [1, 2] {
            let model = window(4, 30, max_len, true).expect("rendered");
            assert_eq!(model.window, vec![4]);
            assert_eq!(model.last_page, Some(30));
        }
        assert_eq!(window(4, 30, 3, true).expect("rendered").window, vec![4]);
        assert_eq!(window(4, 30, 4, true).expect("rendered").window, vec![4, 5]);
    }

    #[test]
    fn controls_render_in_order_with_suffixed_labels() {
        let model = window(2, 30, 5, true).expect("rendered");
        let controls = model.controls("of search results");

        assert_eq!(
            controls,
            vec![
                PageControl::Previous {
                    target: 1,
                    aria_label: "Previous page of search results".to_string(),
                },
                PageControl::Page {
                    page: 2,
                    current: true,
                    aria_label: "Page 2 of search results".to_string(),
                },
                PageControl::Page {
                    page: 3,
                    current: false,
                    aria_label: "Page 3 of search results".to_string(),
                },
                PageControl::Page {
                    page: 4,
                    current: false,
                    aria_label: "Page 4 of search results".to_string(),
                },
                PageControl::Ellipsis,
                PageControl::LastPage {
                    page: 30,
                    aria_label: "Page 30 of search results".to_string(),
                },
                PageControl::Next {
                    target: 3,
                    aria_label: "Next page of search results".to_string(),
                },
            ]
        );
    }

    #[test]
    fn ellipsis_selection_is_a_no_op() {
        let controller = PaginationController::default();
        assert_eq!(PageControl::Ellipsis.select(), None);
        assert!(controller.activate(&PageControl::Ellipsis).is_empty());
        assert!(controller
            .activate_with_key(&PageControl::Ellipsis, "Enter")
            .is_empty());
    }

    #[test]
    fn selections_emit_page_and_tracking_event() {
        let controller = PaginationController::default();
        let controls = controller.controls(3, 12);
        let next = controls.last().expect("next control");

        assert_eq!(
            controller.activate(next),
            vec![
                PaginationMessage::PageSelected(4),
                PaginationMessage::Analytics(AnalyticsEvent {
                    component_name: "va-pagination".to_string(),
                    action: "nav-paginate-next".to_string(),
                    details: json!({ "page": 4 }),
                }),
            ]
        );

        let previous = &controls[0];
        match &controller.activate(previous)[1] {
            PaginationMessage::Analytics(event) => {
                assert_eq!(event.action, "nav-paginate-previous")
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn keyboard_and_pointer_activation_are_identical() {
        let controller = PaginationController::default();
        let page = PageControl::Page {
            page: 7,
            current: false,
            aria_label: "Page 7".to_string(),
        };

        let pointer = controller.activate(&page);
        assert_eq!(controller.activate_with_key(&page, "Enter"), pointer);
        assert_eq!(controller.activate_with_key(&page, " "), pointer);
        assert!(controller.activate_with_key(&page, "Tab").is_empty());
    }

    #[test]
    fn disabled_analytics_only_emits_the_selection() {
        let controller = PaginationController::new(PaginationConfig {
            disable_analytics: true,
            ..PaginationConfig::default()
        });
        let last = PageControl::LastPage {
            page: 40,
            aria_label: "Page 40".to_string(),
        };

        assert_eq!(
            controller.activate(&last),
            vec![PaginationMessage::PageSelected(40)]
        );
    }
}
