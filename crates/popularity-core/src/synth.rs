// File: crates/popularity-core/src/synth.rs
// Summary: Placeholder popularity series: base level + Gaussian spikes at releases + bounded noise.

use rand::Rng;

use crate::events::ReleaseEvent;
use crate::geometry::clamp;

/// One attention spike. Centred on a reference index supplied at generation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bump {
    pub amplitude: f64,
    pub sigma: f64,
}

/// Shape of one tracked metric.
/// Contract: `noise >= 0`; `bumps[k]` pairs with the k-th reference index.
#[derive(Clone, Copy, Debug)]
pub struct MetricProfile {
    pub name: &'static str,
    pub base: fn(usize) -> f64,
    pub bumps: [Bump; 2],
    pub noise: f64,
}

fn flat_base(_i: usize) -> f64 { 15.0 }

fn oscillating_base(i: usize) -> f64 { 10.0 + 5.0 * (i as f64 / 6.0).sin() }

pub const SEARCH_INTEREST: MetricProfile = MetricProfile {
    name: "Search interest",
    base: flat_base,
    bumps: [Bump { amplitude: 85.0, sigma: 1.5 }, Bump { amplitude: 70.0, sigma: 1.8 }],
    noise: 4.0,
};

pub const SOCIAL_MENTIONS: MetricProfile = MetricProfile {
    name: "Social mentions",
    base: oscillating_base,
    bumps: [Bump { amplitude: 70.0, sigma: 2.5 }, Bump { amplitude: 55.0, sigma: 2.8 }],
    noise: 3.0,
};

/// Unnormalized Gaussian, 1.0 at `mu`.
#[inline]
pub fn gauss(i: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5 * ((i - mu) / sigma).powi(2)).exp()
}

/// Index of each event's `YYYY-MM` tick in `labels`, exact match only.
pub fn reference_indices(labels: &[String], events: &[ReleaseEvent]) -> Vec<Option<usize>> {
    events
        .iter()
        .map(|e| {
            let tick = e.tick();
            labels.iter().position(|l| *l == tick)
        })
        .collect()
}

/// Noise-free value at index `i`, before clamping.
pub fn shape_at(profile: &MetricProfile, i: usize, centers: &[Option<usize>]) -> f64 {
    let spikes: f64 = profile
        .bumps
        .iter()
        .zip(centers)
        .filter_map(|(b, c)| c.map(|mu| b.amplitude * gauss(i as f64, mu as f64, b.sigma)))
        .sum();
    (profile.base)(i) + spikes
}

/// Generate `len` samples in [0, 100]. Absent centers contribute no spike.
pub fn generate<R: Rng + ?Sized>(
    profile: &MetricProfile,
    len: usize,
    centers: &[Option<usize>],
    rng: &mut R,
) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let noise = if profile.noise > 0.0 { rng.gen_range(-profile.noise..=profile.noise) } else { 0.0 };
            clamp(shape_at(profile, i, centers) + noise, 0.0, 100.0).round()
        })
        .collect()
}

/// Both demo metrics over one label axis.
#[derive(Clone, Debug)]
pub struct SyntheticSeries {
    pub search_interest: Vec<f64>,
    pub social_mentions: Vec<f64>,
}

pub fn synthesize<R: Rng + ?Sized>(labels: &[String], events: &[ReleaseEvent], rng: &mut R) -> SyntheticSeries {
    let centers = reference_indices(labels, events);
    if centers.iter().any(Option::is_none) {
        log::debug!("release tick missing from labels; its spike is omitted");
    }
    SyntheticSeries {
        search_interest: generate(&SEARCH_INTEREST, labels.len(), &centers, rng),
        social_mentions: generate(&SOCIAL_MENTIONS, labels.len(), &centers, rng),
    }
}
