//! Radial stagger delays and the settle deadline derived from them.

use glam::Vec2;
use rand::Rng;
use std::time::Duration;

/// Per-cell stagger delays (seconds) radiating from `origin_index`.
///
/// `delay[i] = |centers[i] - centers[origin]| * base_delay + U[0, noise)`,
/// except the origin itself which is pinned to exactly `0.0` so it always
/// animates first. The random source is injected so callers can seed it.
pub fn compute_delays<R: Rng + ?Sized>(
    centers: &[Vec2],
    origin_index: usize,
    base_delay: f32,
    noise_amplitude: f32,
    rng: &mut R,
) -> Vec<f32> {
    let Some(&origin) = centers.get(origin_index) else {
        if !centers.is_empty() {
            log::warn!(
                "[ripple] origin {} outside grid of {} cells; skipping stagger",
                origin_index,
                centers.len()
            );
        }
        return vec![0.0; centers.len()];
    };

    centers
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i == origin_index {
                return 0.0;
            }
            let noise = if noise_amplitude > 0.0 {
                rng.gen::<f32>() * noise_amplitude
            } else {
                0.0
            };
            c.distance(origin) * base_delay + noise
        })
        .collect()
}

/// Largest delay in seconds; an empty grid counts as zero.
pub fn max_delay(delays: &[f32]) -> f32 {
    delays
        .iter()
        .copied()
        .filter(|d| d.is_finite())
        .fold(0.0_f32, f32::max)
}

/// Time from trigger until the grid may fade back to idle:
/// `max(delays) * 1000 + spring_settle_ms + fade_buffer_ms`.
pub fn settle_delay(delays: &[f32], spring_settle_ms: f64, fade_buffer_ms: f64) -> Duration {
    let ms = max_delay(delays) as f64 * 1000.0 + spring_settle_ms + fade_buffer_ms;
    let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
    Duration::from_secs_f64(ms / 1000.0)
}
