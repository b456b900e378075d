// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Sensor History Store

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Scenario;
use crate::types::{SensorChannel, SensorReadings};

/// Batches shown on the dashboard x-axis; appends past this are dropped.
pub const MAX_BATCHES: usize = 8;

/// Largest history a configuration may ask for.
pub const BATCH_LIMIT: usize = 64;

/// Healthy batches placed before the first problem batch when seeding.
pub const BASELINE_BATCHES: usize = 2;

/// Per-channel ordered readings, index 0 = earliest batch.
///
/// All four channels always have the same length: every mutation pushes or
/// clears all of them together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorHistory {
    sg: Vec<Decimal>,
    wort_temp: Vec<Decimal>,
    co2_activity: Vec<Decimal>,
    ph: Vec<Decimal>,
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    MAX_BATCHES
}

impl Default for SensorHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_BATCHES)
    }

    /// Channels grow on demand; `capacity` only caps `append`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sg: Vec::new(),
            wort_temp: Vec::new(),
            co2_activity: Vec::new(),
            ph: Vec::new(),
            capacity,
        }
    }

    /// Reset to `baseline` copies of the healthy readings followed by one
    /// reading of the starting scenario.
    pub fn seed(&mut self, good: &Scenario, start: &Scenario, baseline: usize) {
        self.clear();
        for _ in 0..baseline {
            self.push(&good.readings);
        }
        self.push(&start.readings);
        log::debug!("[HISTORY] seeded from {} with {} baseline batches", start.name, baseline);
    }

    /// Append one batch. Returns `false`, leaving every channel untouched,
    /// once the history is at capacity.
    pub fn append(&mut self, scenario: &Scenario) -> bool {
        if self.len() >= self.capacity {
            log::debug!("[HISTORY] at capacity ({}), dropped batch for {}", self.capacity, scenario.name);
            return false;
        }
        self.push(&scenario.readings);
        true
    }

    pub fn channel(&self, channel: SensorChannel) -> &[Decimal] {
        match channel {
            SensorChannel::Sg => &self.sg,
            SensorChannel::WortTemp => &self.wort_temp,
            SensorChannel::Co2Activity => &self.co2_activity,
            SensorChannel::Ph => &self.ph,
        }
    }

    /// Number of batches recorded (identical across channels).
    pub fn len(&self) -> usize {
        self.sg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sg.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Most recent batch, if any.
    pub fn latest(&self) -> Option<SensorReadings> {
        Some(SensorReadings {
            sg: *self.sg.last()?,
            wort_temp: *self.wort_temp.last()?,
            co2_activity: *self.co2_activity.last()?,
            ph: *self.ph.last()?,
        })
    }

    fn push(&mut self, readings: &SensorReadings) {
        self.sg.push(readings.sg);
        self.wort_temp.push(readings.wort_temp);
        self.co2_activity.push(readings.co2_activity);
        self.ph.push(readings.ph);
    }

    fn clear(&mut self) {
        self.sg.clear();
        self.wort_temp.clear();
        self.co2_activity.clear();
        self.ph.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScenarioCatalog;
    use crate::types::ScenarioId;

    fn lengths(h: &SensorHistory) -> Vec<usize> {
        SensorChannel::ALL.iter().map(|c| h.channel(*c).len()).collect()
    }

    #[test]
    fn seed_places_baseline_then_start() {
        let catalog = ScenarioCatalog::standard().unwrap();
        let good = catalog.all_good();
        let start = catalog.get(ScenarioId(6)).unwrap();

        let mut history = SensorHistory::new();
        history.seed(good, start, BASELINE_BATCHES);

        assert_eq!(history.len(), 3);
        assert_eq!(lengths(&history), vec![3, 3, 3, 3]);
        assert_eq!(history.channel(SensorChannel::Sg), &[good.readings.sg, good.readings.sg, start.readings.sg]);
        assert_eq!(history.latest(), Some(start.readings));
    }

    #[test]
    fn reseeding_discards_previous_batches() {
        let catalog = ScenarioCatalog::standard().unwrap();
        let good = catalog.all_good();
        let mut history = SensorHistory::new();
        history.seed(good, catalog.get(ScenarioId(16)).unwrap(), BASELINE_BATCHES);
        history.append(good);
        history.seed(good, catalog.get(ScenarioId(5)).unwrap(), BASELINE_BATCHES);
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest().map(|r| r.ph), Some(catalog.get(ScenarioId(5)).unwrap().readings.ph));
    }

    #[test]
    fn append_stops_at_capacity() {
        let catalog = ScenarioCatalog::standard().unwrap();
        let good = catalog.all_good();
        let bad = catalog.get(ScenarioId(16)).unwrap();
        let mut history = SensorHistory::new();
        history.seed(good, bad, BASELINE_BATCHES);

        for _ in history.len()..MAX_BATCHES {
            assert!(history.append(bad));
        }
        assert!(history.is_full());

        let before = history.clone();
        assert!(!history.append(good));
        assert_eq!(history, before);
        assert_eq!(lengths(&history), vec![MAX_BATCHES; 4]);
    }

    #[test]
    fn empty_history_has_no_latest() {
        let history = SensorHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
    }
}
