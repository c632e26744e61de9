//! Analytics event model and sink contracts with no-op and in-memory adapters.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Observability payload emitted by interactive components.
pub struct AnalyticsEvent {
    /// Emitting component (for example `va-modal`).
    pub component_name: String,
    /// Semantic action identifier.
    pub action: String,
    /// Action-specific details.
    pub details: Value,
}

/// Host service receiving component analytics events.
///
/// Recording is fire-and-forget; sinks must never block or fail the emitting interaction.
pub trait AnalyticsSink {
    /// Records one event.
    fn record(&self, event: &AnalyticsEvent);
}

#[derive(Debug, Clone, Default)]
/// In-memory analytics sink that keeps every recorded event.
pub struct MemoryAnalyticsSink {
    inner: Rc<RefCell<Vec<AnalyticsEvent>>>,
}

impl MemoryAnalyticsSink {
    /// Returns a snapshot of recorded events in emission order.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.inner.borrow().clone()
    }

    /// Drops all recorded events.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

impl AnalyticsSink for MemoryAnalyticsSink {
    fn record(&self, event: &AnalyticsEvent) {
        self.inner.borrow_mut().push(event.clone());
    }
}
