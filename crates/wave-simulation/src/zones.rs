//! Compression and rarefaction detection for longitudinal waves
//!
//! Consecutive node pairs are scanned in order. A run of tight pairs is a
//! compression, a run of loose pairs a rarefaction; short runs are noise.

use crate::node::WaveNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Compression,
    Rarefaction,
}

impl ZoneKind {
    /// Single-letter marker drawn on the chain
    pub fn marker(self) -> &'static str {
        match self {
            ZoneKind::Compression => "C",
            ZoneKind::Rarefaction => "R",
        }
    }
}

/// A labelled run of pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub kind: ZoneKind,
    /// Mean along-chain coordinate of the member pairs' midpoints
    pub center_x: f32,
    pub pair_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneThresholds {
    /// Spacing below this is compressed
    pub compression: f32,
    /// Spacing above this is rarefied
    pub rarefaction: f32,
    /// Shortest run that counts as a zone
    pub min_pairs: usize,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            compression: 10.0,
            rarefaction: 14.0,
            min_pairs: 2,
        }
    }
}

/// Open run of pairs for one zone kind
#[derive(Debug)]
struct ZoneRun {
    kind: ZoneKind,
    count: usize,
    sum_x: f32,
}

impl ZoneRun {
    fn new(kind: ZoneKind) -> Self {
        Self {
            kind,
            count: 0,
            sum_x: 0.0,
        }
    }

    fn extend(&mut self, mid_x: f32) {
        self.count += 1;
        self.sum_x += mid_x;
    }

    /// Close the run, emitting a zone if it was long enough
    fn flush(&mut self, min_pairs: usize, zones: &mut Vec<Zone>) {
        if self.count > 0 && self.count >= min_pairs {
            zones.push(Zone {
                kind: self.kind,
                center_x: self.sum_x / self.count as f32,
                pair_count: self.count,
            });
        }
        self.count = 0;
        self.sum_x = 0.0;
    }

    fn feed(&mut self, inside: bool, mid_x: f32, min_pairs: usize, zones: &mut Vec<Zone>) {
        if inside {
            self.extend(mid_x);
        } else {
            self.flush(min_pairs, zones);
        }
    }
}

/// Detect zones from `(spacing, midpoint_x)` pairs in chain order.
///
/// Open runs are flushed at the end, so a zone touching the wall is reported.
pub fn detect_zones<I>(pairs: I, thresholds: &ZoneThresholds) -> Vec<Zone>
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let mut zones = Vec::new();
    let mut compression = ZoneRun::new(ZoneKind::Compression);
    let mut rarefaction = ZoneRun::new(ZoneKind::Rarefaction);

    for (spacing, mid_x) in pairs {
        compression.feed(
            spacing < thresholds.compression,
            mid_x,
            thresholds.min_pairs,
            &mut zones,
        );
        rarefaction.feed(
            spacing > thresholds.rarefaction,
            mid_x,
            thresholds.min_pairs,
            &mut zones,
        );
    }

    compression.flush(thresholds.min_pairs, &mut zones);
    rarefaction.flush(thresholds.min_pairs, &mut zones);
    zones
}

/// Spacing and midpoint of every consecutive node pair
pub fn pair_spacings(nodes: &[WaveNode]) -> impl Iterator<Item = (f32, f32)> + '_ {
    nodes.windows(2).map(|pair| {
        let (a, b) = (pair[0].position, pair[1].position);
        (a.distance(b), (a.x + b.x) * 0.5)
    })
}

/// Detect zones directly on a chain
pub fn detect_chain_zones(nodes: &[WaveNode], thresholds: &ZoneThresholds) -> Vec<Zone> {
    detect_zones(pair_spacings(nodes), thresholds)
}
