// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Dashboard View Model
//
// Everything the graph renderer needs, already converted to plain f64 and
// strings. The renderer draws; it never reaches back into the session.

use serde::Serialize;

use crate::adapter;
use crate::history::SensorHistory;
use crate::types::SensorChannel;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelView {
    pub channel: SensorChannel,
    pub label: &'static str,
    pub unit: &'static str,
    pub color: &'static str,
    pub min: f64,
    pub max: f64,
    pub normal_low: f64,
    pub normal_high: f64,
    pub precision: u32,
    pub readings: Vec<f64>,
    /// Each reading as a 0..1 fraction of the axis, bottom = 0.
    pub heights: Vec<f64>,
    /// Whether each reading lies inside the normal band.
    pub in_band: Vec<bool>,
    /// Latest reading formatted with the channel precision.
    pub latest_label: Option<String>,
}

impl ChannelView {
    pub fn build(channel: SensorChannel, history: &SensorHistory) -> Self {
        let series = history.channel(channel);
        let bounds = channel.bounds();
        let (normal_low, normal_high) = channel.normal_band();
        Self {
            channel,
            label: channel.label(),
            unit: channel.unit(),
            color: channel.line_color(),
            min: adapter::to_f64(bounds.0),
            max: adapter::to_f64(bounds.1),
            normal_low: adapter::to_f64(normal_low),
            normal_high: adapter::to_f64(normal_high),
            precision: channel.precision(),
            readings: adapter::series_to_f64(series),
            heights: series.iter().map(|v| adapter::normalized(*v, bounds)).collect(),
            in_band: series.iter().map(|v| channel.is_normal(*v)).collect(),
            latest_label: series.last().map(|v| channel.format_reading(*v)),
        }
    }

    /// Graph heading, e.g. `Wort Temp (°C)`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.label, self.unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub title: String,
    /// X-axis labels for every batch slot, `T1` through `T{max}`.
    pub batch_labels: Vec<String>,
    pub channels: Vec<ChannelView>,
}

impl DashboardView {
    pub fn build(title: impl Into<String>, history: &SensorHistory) -> Self {
        Self {
            title: title.into(),
            batch_labels: (1..=history.capacity()).map(|b| format!("T{}", b)).collect(),
            channels: SensorChannel::ALL
                .iter()
                .map(|c| ChannelView::build(*c, history))
                .collect(),
        }
    }
}
