// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Totals;
use crate::models::{SeriesEntry, SeriesOrder};

pub const DEFAULT_PALETTE: [&str; 6] = [
    "#f39c12", "#e74c3c", "#8e44ad", "#2ecc71", "#3498db", "#1abc9c",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<String>);

impl Palette {
    pub fn new(colors: Vec<String>) -> Self {
        Palette(colors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn color(&self, color_index: usize) -> Option<&str> {
        if self.0.is_empty() {
            return None;
        }
        self.0.get(color_index % self.0.len()).map(String::as_str)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

/// Turn per-key sums into chart series. Colors are assigned by output
/// position, after ordering, so a fixed input always gets the same colors.
pub fn to_series(totals: &Totals, order: SeriesOrder, palette_len: usize) -> Vec<SeriesEntry> {
    let mut items: Vec<(String, f64)> = totals.entries().to_vec();
    match order {
        SeriesOrder::Insertion => {}
        SeriesOrder::ValueDesc => items.sort_by(|a, b| b.1.total_cmp(&a.1)),
        SeriesOrder::Label => items.sort_by(|a, b| a.0.cmp(&b.0)),
    }
    items
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| SeriesEntry {
            label,
            value,
            color_index: if palette_len == 0 { 0 } else { i % palette_len },
        })
        .collect()
}
