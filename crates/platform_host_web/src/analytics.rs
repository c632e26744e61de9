//! Browser analytics sink that writes component events to the developer console.

use leptos::logging;
use platform_host::{AnalyticsEvent, AnalyticsSink};

#[derive(Debug, Clone, Copy, Default)]
/// Analytics sink logging each event as a JSON line.
pub struct ConsoleAnalyticsSink;

impl AnalyticsSink for ConsoleAnalyticsSink {
    fn record(&self, event: &AnalyticsEvent) {
        match serde_json::to_string(event) {
            Ok(json) => logging::log!("component-library-analytics {json}"),
            Err(err) => logging::warn!("analytics event serialize failed: {err}"),
        }
    }
}
