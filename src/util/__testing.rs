//! Testing utilities, do not depend on any of these in production!

use fastrand::Rng;
use itertools::Itertools;
use num::complex::Complex64;

use crate::{Poly64, Root};

struct RandStreamF64 {
    state: Rng,
}

impl RandStreamF64 {
    fn new(seed: u64) -> Self {
        Self {
            state: Rng::with_seed(seed),
        }
    }
}

impl Iterator for RandStreamF64 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.state.f64())
    }
}

/// Uniformly distributed real numbers in `[min, max)`
pub struct RandStreamR64 {
    real_stream: RandStreamF64,
    min: f64,
    max: f64,
}

impl RandStreamR64 {
    #[must_use]
    pub fn new(seed: u64, min: f64, max: f64) -> Self {
        assert!(min <= max, "minimum should be smaller or equal to maximum");
        Self {
            real_stream: RandStreamF64::new(seed),
            min,
            max,
        }
    }
}

impl Iterator for RandStreamR64 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.real_stream.next()?).mul_add(self.max - self.min, self.min))
    }
}

/// Complex numbers in an annulus, angles given as fractions of a full turn
pub struct RandStreamC64Polar {
    real_stream: RandStreamF64,
    min_radius: f64,
    max_radius: f64,
    min_angle: f64,
    max_angle: f64,
}

impl RandStreamC64Polar {
    #[must_use]
    pub fn new(
        seed: u64,
        min_radius: f64,
        max_radius: f64,
        min_angle: f64,
        max_angle: f64,
    ) -> Self {
        assert!(
            0.0 <= min_angle && max_angle <= 1.0,
            "angles should be specified in the range [0,1]"
        );
        assert!(
            min_angle <= max_angle,
            "min_angle should be smaller or equal to max_angle"
        );
        assert!(0.0 <= min_radius, "radius should be non-negative");
        assert!(
            min_radius <= max_radius,
            "min_radius should be smaller or equal to max_radius"
        );
        Self {
            real_stream: RandStreamF64::new(seed),
            min_radius,
            max_radius,
            min_angle,
            max_angle,
        }
    }
}

impl Iterator for RandStreamC64Polar {
    type Item = Complex64;

    fn next(&mut self) -> Option<Self::Item> {
        let r =
            (self.real_stream.next()?).mul_add(self.max_radius - self.min_radius, self.min_radius);
        let a = (self.real_stream.next()?).mul_add(self.max_angle - self.min_angle, self.min_angle);
        debug_assert!(r >= 0.0);
        debug_assert!((0.0..=1.0).contains(&a));
        Some(Complex64::from_polar(r, a * std::f64::consts::TAU))
    }
}

/// Generate one test case with real roots, scaled by a random leading
/// coefficient.
pub fn test_case_roots(
    roots_stream: impl Iterator<Item = f64>,
    mut scale_stream: impl Iterator<Item = f64>,
    degree: usize,
) -> (Poly64, Vec<Complex64>) {
    let roots = roots_stream
        .take(degree)
        .map(|re| Complex64::new(re, 0.0))
        .collect_vec();
    let poly = Poly64::from_roots(&roots)
        .scaled(scale_stream.next().expect("rng stream should be infinite"));
    (poly, roots)
}

/// Generate one test case made of conjugate pairs, plus one real root if
/// `degree` is odd.
pub fn test_case_conj_roots(
    mut roots_stream: impl Iterator<Item = Complex64>,
    mut scale_stream: impl Iterator<Item = f64>,
    degree: usize,
) -> (Poly64, Vec<Complex64>) {
    let mut roots = roots_stream
        .by_ref()
        .take(degree / 2)
        .flat_map(|z| [z, z.conj()])
        .collect_vec();
    if degree % 2 == 1 {
        let z = roots_stream.next().expect("rng stream should be infinite");
        roots.push(Complex64::new(z.re, 0.0));
    }
    let poly = Poly64::from_roots(&roots)
        .scaled(scale_stream.next().expect("rng stream should be infinite"));
    (poly, roots)
}

/// Check that all roots have been found, regardless of order
#[must_use]
pub fn check_roots(roots1: &[Root<f64>], mut roots2: Vec<Complex64>, tol: f64) -> bool {
    if roots1.len() != roots2.len() {
        return false;
    }

    for r1 in roots1.iter().map(|r| r.to_complex()) {
        let mut best_idx = 0;
        let mut best_d = f64::MAX;
        for (i, r2) in roots2.iter().enumerate() {
            let d = (r1 - r2).norm();
            if d < best_d {
                best_idx = i;
                best_d = d;
            }
        }
        if best_d > tol {
            return false;
        }
        roots2.remove(best_idx);
    }
    true
}
