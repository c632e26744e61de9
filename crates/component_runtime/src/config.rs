//! JSON attribute parsing for component configuration.

use thiserror::Error;

use crate::model::{OverlayConfig, PaginationConfig};

#[derive(Debug, Error)]
/// Configuration payloads that could not be applied.
pub enum ConfigError {
    /// The payload was not valid JSON for the target config shape.
    #[error("invalid {component} config: {source}")]
    Invalid {
        /// Config shape being parsed.
        component: &'static str,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// A selector entry was empty.
    #[error("empty selector in `{field}`")]
    EmptySelector {
        /// Offending field name.
        field: &'static str,
    },
}

/// Parses an overlay config from a JSON attribute payload. Missing fields take defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for malformed JSON and [`ConfigError::EmptySelector`] when a
/// selector field is present but blank.
pub fn parse_overlay_config(raw: &str) -> Result<OverlayConfig, ConfigError> {
    let config: OverlayConfig =
        serde_json::from_str(raw).map_err(|source| ConfigError::Invalid {
            component: "overlay",
            source,
        })?;
    if config
        .initial_focus_selector
        .as_deref()
        .is_some_and(|selector| selector.trim().is_empty())
    {
        return Err(ConfigError::EmptySelector {
            field: "initialFocusSelector",
        });
    }
    if config
        .aria_hidden_exempt
        .iter()
        .any(|selector| selector.trim().is_empty())
    {
        return Err(ConfigError::EmptySelector {
            field: "ariaHiddenExempt",
        });
    }
    Ok(config)
}

/// Parses a pagination config from a JSON attribute payload. Missing fields take defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for malformed JSON.
pub fn parse_pagination_config(raw: &str) -> Result<PaginationConfig, ConfigError> {
    serde_json::from_str(raw).map_err(|source| ConfigError::Invalid {
        component: "pagination",
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DEFAULT_MAX_PAGE_LIST_LENGTH;

    #[test]
    fn overlay_config_fills_defaults_from_partial_payload() {
        let config = parse_overlay_config(
            r##"{"clickToClose": true, "initialFocusSelector": "#confirm", "title": "Heads up"}"##,
        )
        .expect("parse");

        assert!(config.click_to_close);
        assert!(!config.hide_close_button);
        assert_eq!(config.initial_focus_selector.as_deref(), Some("#confirm"));
        assert_eq!(config.title.as_deref(), Some("Heads up"));
        assert_eq!(config.component_name, "va-modal");
    }

    #[test]
    fn overlay_config_rejects_blank_selectors() {
        let err = parse_overlay_config(r##"{"ariaHiddenExempt": ["#banner", " "]}"##)
            .expect_err("blank selector");
        assert_eq!(err.to_string(), "empty selector in `ariaHiddenExempt`");
    }

    #[test]
    fn pagination_config_defaults_list_length() {
        let config = parse_pagination_config(r#"{"showLastPage": true}"#).expect("parse");
        assert_eq!(config.max_page_list_length, DEFAULT_MAX_PAGE_LIST_LENGTH);
        assert!(config.show_last_page);
    }

    #[test]
    fn malformed_payload_reports_component() {
        let err = parse_pagination_config("{").expect_err("malformed");
        assert!(err.to_string().starts_with("invalid pagination config"));
    }
}
