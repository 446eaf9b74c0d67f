//! Two-pass SPH force computation.
//!
//! Pass 1 accumulates density from the poly6 kernel and derives pressure
//! from the gas state equation. Pass 2 accumulates the pressure, viscosity
//! and surface-tension forces plus density-weighted gravity, then resolves
//! wall penetration.
//!
//! Both passes consult the quadtree with a query box of half-extent
//! `query_radius_scale * h` around each particle; the box over-covers the
//! kernel support, and the `r^2 <= h^2` checks below do the exact cut.

use crate::bounds::Aabb;
use crate::config::SimConfig;
use crate::kernels;
use crate::particle::ParticleSet;
use crate::quadtree::Quadtree;
use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Density and pressure for every particle (pass 1).
///
/// A particle always finds itself in its own query box, so density is
/// strictly positive whenever the particle is inside the tree.
pub fn compute_density_pressure(particles: &mut ParticleSet, tree: &Quadtree, config: &SimConfig) {
    let count = particles.len();
    let h = config.smoothing_radius;
    let h_sq = h * h;
    let support = config.query_radius_scale * h;

    let position = &particles.position;
    let mass = &particles.mass;
    let density_at = |i: usize| -> f32 {
        let pos_i = position[i];
        let mut sum = 0.0_f32;
        tree.for_each_in_range(&Aabb::centered(pos_i, support), &mut |j| {
            let r_sq = (pos_i - position[j as usize]).length_squared();
            if r_sq < h_sq {
                sum += kernels::poly6(r_sq, h);
            }
        });
        sum * mass[i]
    };

    #[cfg(feature = "parallel")]
    let densities: Vec<f32> = (0..count).into_par_iter().map(density_at).collect();

    #[cfg(not(feature = "parallel"))]
    let densities: Vec<f32> = (0..count).map(density_at).collect();

    for i in 0..count {
        particles.density[i] = densities[i];
        particles.pressure[i] = config.gas_stiffness * (densities[i] - config.rest_density);
    }
}

/// Per-particle force terms produced by pass 2.
struct ForceResult {
    acceleration: Vec3,
    surface_normal: Vec3,
}

/// Accelerations and surface normals for every particle (pass 2).
///
/// Reads only the pre-pass state (positions, velocities, densities,
/// pressures), so results are independent of particle iteration order.
/// Requires densities from [`compute_density_pressure`] in the same tick.
pub fn compute_forces(particles: &mut ParticleSet, tree: &Quadtree, config: &SimConfig) {
    let count = particles.len();
    let h = config.smoothing_radius;
    let h_sq = h * h;
    let support = config.query_radius_scale * h;

    let position = &particles.position;
    let velocity = &particles.velocity;
    let density = &particles.density;
    let pressure = &particles.pressure;
    let mass = &particles.mass;

    let force_at = |i: usize| -> ForceResult {
        let pos_i = position[i];
        let vel_i = velocity[i];

        let mut f_pressure = Vec3::ZERO;
        let mut f_viscosity = Vec3::ZERO;
        let mut color_normal = Vec3::ZERO;
        let mut color_laplacian = 0.0_f32;

        tree.for_each_in_range(&Aabb::centered(pos_i, support), &mut |j| {
            let j = j as usize;
            let diff = pos_i - position[j];
            let r_sq = diff.length_squared();
            if r_sq > h_sq {
                return;
            }
            let rho_j = density[j].max(config.min_density);

            if r_sq > 0.0 {
                let gradient = kernels::pressure_gradient(diff, r_sq, h);
                f_pressure += gradient * ((pressure[i] + pressure[j]) / (2.0 * rho_j));
                color_normal += gradient / rho_j;
            }

            f_viscosity += (velocity[j] - vel_i) * (kernels::viscosity_laplacian(r_sq, h) / rho_j);
            color_laplacian += kernels::poly6_laplacian(r_sq, h) / rho_j;
        });

        f_pressure *= -mass[i];
        f_viscosity *= config.viscosity * mass[i];
        color_normal *= mass[i];
        color_laplacian *= mass[i];

        // The stored normal is the negated color gradient; the tension force
        // itself is taken from the raw gradient, which points into the fluid
        // and pulls boundary particles toward their neighbors.
        let surface_normal = -color_normal;

        let mut f_surface = Vec3::ZERO;
        let normal_len = color_normal.length();
        if normal_len > config.surface_threshold {
            f_surface = color_normal * (-config.surface_tension * color_laplacian / normal_len);
        }

        let f_gravity = Vec3::new(0.0, density[i] * config.gravity, 0.0);

        ForceResult {
            acceleration: (f_pressure + f_viscosity + f_surface + f_gravity)
                / density[i].max(config.min_density),
            surface_normal,
        }
    };

    #[cfg(feature = "parallel")]
    let forces: Vec<ForceResult> = (0..count).into_par_iter().map(force_at).collect();

    #[cfg(not(feature = "parallel"))]
    let forces: Vec<ForceResult> = (0..count).map(force_at).collect();

    for (i, f) in forces.into_iter().enumerate() {
        particles.acceleration[i] = f.acceleration;
        particles.surface_normal[i] = f.surface_normal;
    }
}

/// Push penetrating particles back to the wall surface and reflect the
/// velocity component along the wall normal, scaled by the restitution
/// factor. Mutates position and velocity in place; walls contribute no
/// force to the acceleration.
pub fn apply_wall_collisions(particles: &mut ParticleSet, config: &SimConfig) {
    for i in 0..particles.len() {
        for wall in &config.walls {
            let d = wall.normal.dot(wall.point - particles.position[i]) + config.particle_radius;
            if d > 0.0 {
                particles.position[i] += wall.normal * d;
                let vn = particles.velocity[i].dot(wall.normal);
                particles.velocity[i] -= wall.normal * (vn * config.restitution);
            }
        }
    }
}
