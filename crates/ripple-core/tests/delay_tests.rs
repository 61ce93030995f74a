// Host-side tests for radial delay computation and settle timing.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ripple_core::{
    compute_delays, compute_shape, max_delay, settle_delay, GridLayout, Rect,
};

fn centers() -> Vec<Vec2> {
    let shape = compute_shape(1280.0, 720.0, 80.0, 2.0);
    GridLayout::new(Rect::new(0.0, 0.0, 1280.0, 720.0), shape, 10.0, 10.0).cell_centers()
}

#[test]
fn origin_delay_is_exactly_zero() {
    let centers = centers();
    let mut rng = StdRng::seed_from_u64(7);
    for origin in [0, 1, centers.len() / 2, centers.len() - 1] {
        let delays = compute_delays(&centers, origin, 0.0008, 0.1, &mut rng);
        assert_eq!(delays.len(), centers.len());
        assert_eq!(delays[origin], 0.0, "origin {origin} was perturbed");
    }
}

#[test]
fn delays_stay_within_distance_bounds() {
    let centers = centers();
    let base = 0.0008_f32;
    let noise = 0.1_f32;
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let origin = (seed as usize * 13) % centers.len();
        let delays = compute_delays(&centers, origin, base, noise, &mut rng);
        for (i, d) in delays.iter().enumerate() {
            if i == origin {
                continue;
            }
            let lower = centers[i].distance(centers[origin]) * base;
            assert!(*d >= lower, "cell {i}: {d} below {lower}");
            assert!(*d <= lower + noise, "cell {i}: {d} above {}", lower + noise);
        }
    }
}

#[test]
fn zero_noise_is_pure_distance() {
    let centers = centers();
    let mut rng = StdRng::seed_from_u64(1);
    let delays = compute_delays(&centers, 5, 0.001, 0.0, &mut rng);
    for (i, d) in delays.iter().enumerate() {
        let expected = if i == 5 {
            0.0
        } else {
            centers[i].distance(centers[5]) * 0.001
        };
        assert_eq!(*d, expected);
    }
}

#[test]
fn delays_grow_with_distance_without_noise() {
    let line: Vec<Vec2> = (0..6).map(|i| Vec2::new(i as f32 * 100.0, 0.0)).collect();
    let mut rng = StdRng::seed_from_u64(3);
    let delays = compute_delays(&line, 0, 0.001, 0.0, &mut rng);
    for w in delays.windows(2) {
        assert!(w[1] > w[0]);
    }
    assert!((delays[5] - 0.5).abs() < 1e-6);
}

#[test]
fn same_seed_gives_same_delays() {
    let centers = centers();
    let a = compute_delays(&centers, 10, 0.0008, 0.1, &mut StdRng::seed_from_u64(42));
    let b = compute_delays(&centers, 10, 0.0008, 0.1, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn empty_grid_yields_empty_delays() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(compute_delays(&[], 0, 0.0008, 0.1, &mut rng).is_empty());
}

#[test]
fn invalid_origin_degrades_to_zero_stagger() {
    let centers = centers();
    let mut rng = StdRng::seed_from_u64(0);
    let delays = compute_delays(&centers, centers.len() + 3, 0.0008, 0.1, &mut rng);
    assert_eq!(delays.len(), centers.len());
    assert!(delays.iter().all(|d| *d == 0.0));
}

#[test]
fn settle_delay_adds_spring_and_buffer() {
    let after = settle_delay(&[0.0, 0.05, 0.12], 600.0, 300.0);
    let ms = after.as_secs_f64() * 1000.0;
    assert!((ms - 1020.0).abs() < 0.01, "got {ms} ms");
}

#[test]
fn settle_delay_of_empty_grid_is_spring_plus_buffer() {
    assert_eq!(max_delay(&[]), 0.0);
    let ms = settle_delay(&[], 600.0, 300.0).as_secs_f64() * 1000.0;
    assert!((ms - 900.0).abs() < 1e-6);
}

#[test]
fn settle_delay_ignores_bad_inputs() {
    assert_eq!(max_delay(&[0.2, f32::NAN, 0.1]), 0.2);
    let ms = settle_delay(&[0.1], f64::NAN, 0.0).as_secs_f64();
    assert_eq!(ms, 0.0);
}
