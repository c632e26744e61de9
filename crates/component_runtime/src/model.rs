use serde::{Deserialize, Serialize};

/// Default number of page buttons rendered by a pagination control.
pub const DEFAULT_MAX_PAGE_LIST_LENGTH: u32 = 10;
/// Body class applied while at least one overlay is open.
pub const OVERLAY_BODY_MARKER: &str = "modal-open";
/// Analytics component name used by overlays unless configured otherwise.
pub const DEFAULT_OVERLAY_COMPONENT: &str = "va-modal";
/// Analytics component name used by pagination unless configured otherwise.
pub const DEFAULT_PAGINATION_COMPONENT: &str = "va-pagination";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    pub click_to_close: bool,
    pub hide_close_button: bool,
    pub initial_focus_selector: Option<String>,
    pub disable_analytics: bool,
    /// Top-level nodes matching any of these selectors stay exposed to assistive technology.
    pub aria_hidden_exempt: Vec<String>,
    pub status: Option<String>,
    pub title: Option<String>,
    pub primary_button_text: Option<String>,
    pub secondary_button_text: Option<String>,
    pub component_name: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            click_to_close: false,
            hide_close_button: false,
            initial_focus_selector: None,
            disable_analytics: false,
            aria_hidden_exempt: Vec::new(),
            status: None,
            title: None,
            primary_button_text: None,
            secondary_button_text: None,
            component_name: DEFAULT_OVERLAY_COMPONENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    pub max_page_list_length: u32,
    pub show_last_page: bool,
    pub aria_label_suffix: String,
    pub disable_analytics: bool,
    pub component_name: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_page_list_length: DEFAULT_MAX_PAGE_LIST_LENGTH,
            show_last_page: false,
            aria_label_suffix: String::new(),
            disable_analytics: false,
            component_name: DEFAULT_PAGINATION_COMPONENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub current_page: u32,
    pub total_pages: u32,
    pub max_page_list_length: u32,
    pub show_last_page: bool,
}

impl PaginationRequest {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            max_page_list_length: DEFAULT_MAX_PAGE_LIST_LENGTH,
            show_last_page: false,
        }
    }

    pub fn from_config(current_page: u32, total_pages: u32, config: &PaginationConfig) -> Self {
        Self {
            current_page,
            total_pages,
            max_page_list_length: config.max_page_list_length,
            show_last_page: config.show_last_page,
        }
    }

    pub fn with_max_page_list_length(self, max_page_list_length: u32) -> Self {
        Self {
            max_page_list_length,
            ..self
        }
    }

    pub fn with_show_last_page(self, show_last_page: bool) -> Self {
        Self {
            show_last_page,
            ..self
        }
    }

    /// Clamps out-of-range input to the nearest valid request instead of rejecting it.
    pub fn normalized(self) -> Self {
        let total_pages = self.total_pages.max(1);
        Self {
            current_page: self.current_page.clamp(1, total_pages),
            total_pages,
            max_page_list_length: self.max_page_list_length.max(1),
            show_last_page: self.show_last_page,
        }
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
