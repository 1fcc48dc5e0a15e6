use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

/// Snapshot reported when the presentation closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub current_slide: usize,
    pub total_slides: usize,
    pub slide_views: BTreeMap<usize, u32>,
    pub time_spent_ms: u64,
}

#[derive(Debug)]
pub struct Analytics {
    started: Instant,
    views: BTreeMap<usize, u32>,
}

impl Analytics {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            views: BTreeMap::new(),
        }
    }

    pub fn record_view(&mut self, index: usize) {
        *self.views.entry(index).or_default() += 1;
    }

    pub fn report(&self, current_slide: usize, total_slides: usize, now: Instant) -> AnalyticsReport {
        let spent = now.saturating_duration_since(self.started).as_millis();
        AnalyticsReport {
            current_slide,
            total_slides,
            slide_views: self.views.clone(),
            time_spent_ms: u64::try_from(spent).unwrap_or(u64::MAX),
        }
    }
}
