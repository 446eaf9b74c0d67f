//! SPH smoothing kernels.
//!
//! All kernels take the squared pairwise distance and the smoothing radius
//! `h`, and vanish outside the support radius (`r >= h` returns zero).
//! Gradient kernels that divide by the raw distance guard `r ~ 0`.
//!
//! Reference: Muller, Charypar & Gross, "Particle-Based Fluid Simulation
//! for Interactive Applications", SCA 2003.

use glam::Vec3;
use std::f32::consts::PI;

/// Poly6 density kernel: `315 / (64 PI h^9) * (h^2 - r^2)^3`.
#[inline]
pub fn poly6(r_sq: f32, h: f32) -> f32 {
    let h_sq = h * h;
    if r_sq >= h_sq {
        return 0.0;
    }
    let h9 = h_sq * h_sq * h_sq * h_sq * h;
    let coeff = 315.0 / (64.0 * PI * h9);
    let diff = h_sq - r_sq;
    coeff * diff * diff * diff
}

/// Gradient of the poly6 kernel with respect to the pairwise offset
/// `diff = p_i - p_j`: `-945 / (32 PI h^9) * (h^2 - r^2)^2 * diff`.
#[inline]
pub fn poly6_gradient(diff: Vec3, r_sq: f32, h: f32) -> Vec3 {
    let h_sq = h * h;
    if r_sq >= h_sq {
        return Vec3::ZERO;
    }
    let h9 = h_sq * h_sq * h_sq * h_sq * h;
    let coeff = -945.0 / (32.0 * PI * h9);
    let term = h_sq - r_sq;
    diff * (coeff * term * term)
}

/// Laplacian of the poly6 kernel:
/// `-945 / (32 PI h^9) * (h^2 - r^2) * (3 h^2 - 7 r^2)`.
#[inline]
pub fn poly6_laplacian(r_sq: f32, h: f32) -> f32 {
    let h_sq = h * h;
    if r_sq >= h_sq {
        return 0.0;
    }
    let h9 = h_sq * h_sq * h_sq * h_sq * h;
    let coeff = -945.0 / (32.0 * PI * h9);
    coeff * (h_sq - r_sq) * (3.0 * h_sq - 7.0 * r_sq)
}

/// Laplacian of the viscosity kernel: `45 / (PI h^6) * (h - r)`.
#[inline]
pub fn viscosity_laplacian(r_sq: f32, h: f32) -> f32 {
    let h_sq = h * h;
    if r_sq >= h_sq {
        return 0.0;
    }
    let h6 = h_sq * h_sq * h_sq;
    let coeff = 45.0 / (PI * h6);
    coeff * (h - r_sq.sqrt())
}

/// Gradient of the spiky kernel:
/// `-45 / (PI h^6) * (h - r)^2 * diff / r`.
///
/// Returns zero for near-zero distances, where the direction is undefined.
#[inline]
pub fn spiky_gradient(diff: Vec3, r_sq: f32, h: f32) -> Vec3 {
    let h_sq = h * h;
    if r_sq >= h_sq || r_sq <= 1.0e-12 {
        return Vec3::ZERO;
    }
    let h6 = h_sq * h_sq * h_sq;
    let coeff = -45.0 / (PI * h6);
    let r = r_sq.sqrt();
    let d = h - r;
    diff * (coeff * d * d / r)
}

/// Kernel used for the pressure-gradient term in the force sum.
///
/// Single selection point: the force loop calls this and nothing else, so
/// swapping in [`spiky_gradient`] is a one-line change here.
#[inline]
pub fn pressure_gradient(diff: Vec3, r_sq: f32, h: f32) -> Vec3 {
    poly6_gradient(diff, r_sq, h)
}
