//! Builders for the analytics payloads emitted by overlays and pagination.

use platform_host::AnalyticsEvent;
use serde_json::json;

use crate::model::OverlayConfig;
use crate::pagination::PaginateAction;

/// Overlay `show` event carrying the surface's status, title, and button labels.
pub fn overlay_show(config: &OverlayConfig) -> AnalyticsEvent {
    AnalyticsEvent {
        component_name: config.component_name.clone(),
        action: "show".to_string(),
        details: json!({
            "status": config.status,
            "title": config.title,
            "primaryButtonText": config.primary_button_text,
            "secondaryButtonText": config.secondary_button_text,
        }),
    }
}

/// Pagination selection event keyed by the semantic navigation identifier.
pub fn paginate(component_name: &str, action: PaginateAction, page: u32) -> AnalyticsEvent {
    AnalyticsEvent {
        component_name: component_name.to_string(),
        action: action.event_id().to_string(),
        details: json!({ "page": page }),
    }
}
