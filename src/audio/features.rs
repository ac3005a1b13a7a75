use serde::Serialize;

use crate::spectrum::Bar;

/// One analysed block, ready for display or serialization.
#[derive(Clone, Debug, Serialize)]
pub struct BarFrame {
    /// Block index within the source
    pub frame: usize,
    /// Start of the block in seconds
    pub time: f64,
    /// Mean magnitude per frequency bin
    pub bins: Vec<f64>,
    /// Bar levels, one per bin
    pub bars: Vec<Bar>,
}

impl BarFrame {
    /// Index of the loudest bin, if there are any bins.
    pub fn peak_bin(&self) -> Option<usize> {
        (0..self.bins.len()).max_by(|&a, &b| self.bins[a].total_cmp(&self.bins[b]))
    }
}
