//! Shared control, overlay, and navigation primitives.

use component_runtime::ConfigError;
use leptos::ev::MouseEvent;
use leptos::*;

mod controls;
mod navigation;
mod overlays;

pub use controls::Button;
pub use navigation::Pagination;
pub use overlays::Modal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Shared button variants.
pub enum ButtonVariant {
    /// Standard action button.
    Standard,
    /// Primary emphasized action button.
    Primary,
    /// Secondary action button.
    Secondary,
    /// Quiet/toggle style button.
    Quiet,
}

impl Default for ButtonVariant {
    fn default() -> Self {
        Self::Standard
    }
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Quiet => "quiet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Shared button sizing tokens.
pub enum ButtonSize {
    /// Dense button.
    Sm,
    /// Default button.
    Md,
}

impl Default for ButtonSize {
    fn default() -> Self {
        Self::Md
    }
}

impl ButtonSize {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
        }
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

/// Applies a JSON config attribute over the typed config; an invalid payload keeps `typed`.
pub(crate) fn resolve_config<T>(
    typed: T,
    json: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, ConfigError>,
) -> T {
    let Some(json) = json else {
        return typed;
    };
    match parse(json) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("component config attribute ignored: {err}");
            typed
        }
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use component_runtime::{
        parse_overlay_config, parse_pagination_config, OverlayConfig, PaginationConfig,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layout_class_merges_only_non_empty_values() {
        assert_eq!(merge_layout_class("ui-modal", None), "ui-modal");
        assert_eq!(merge_layout_class("ui-modal", Some("")), "ui-modal");
        assert_eq!(
            merge_layout_class("ui-pagination", Some("results-footer")),
            "ui-pagination results-footer"
        );
    }

    #[test]
    fn config_attribute_overrides_typed_config_when_valid() {
        let typed = OverlayConfig {
            title: Some("Typed".to_string()),
            ..OverlayConfig::default()
        };
        let resolved = resolve_config(
            typed.clone(),
            Some(r#"{"clickToClose": true, "title": "From attribute"}"#),
            parse_overlay_config,
        );
        assert!(resolved.click_to_close);
        assert_eq!(resolved.title.as_deref(), Some("From attribute"));

        let kept = resolve_config(typed.clone(), Some("{not json"), parse_overlay_config);
        assert_eq!(kept, typed);
        assert_eq!(resolve_config(typed.clone(), None, parse_overlay_config), typed);

        let pagination = resolve_config(
            PaginationConfig::default(),
            Some(r#"{"maxPageListLength": 5, "showLastPage": true}"#),
            parse_pagination_config,
        );
        assert_eq!(pagination.max_page_list_length, 5);
        assert!(pagination.show_last_page);
    }

    #[test]
    fn button_tokens_match_css_contract() {
        assert_eq!(ButtonVariant::default().token(), "standard");
        assert_eq!(ButtonVariant::Quiet.token(), "quiet");
        assert_eq!(ButtonSize::default().token(), "md");
        assert_eq!(bool_token(true), "true");
    }
}
