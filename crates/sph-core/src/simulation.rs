use crate::config::SimConfig;
use crate::particle::ParticleSet;
use crate::quadtree::Quadtree;
use crate::solver;
use crate::timestep::TimestepSmoother;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Plane the 2D dynamics live in; z never varies.
const PLANE_Z: f32 = 1.0;

/// The shared simulation state: particle set, quadtree, timestep history
/// and RNG, advanced one tick at a time.
///
/// Owned exclusively by the orchestrator; the physics, input and render
/// loops each borrow it for the duration of one guarded critical section.
pub struct Simulation {
    particles: ParticleSet,
    tree: Quadtree,
    config: SimConfig,
    smoother: TimestepSmoother,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic respawn jitter for tests.
    pub fn seeded(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, rng: StdRng) -> Self {
        let mut particles = ParticleSet::new();
        for i in 0..config.initial_particles {
            particles.push(
                Vec3::new(i as f32 / 100.0, 0.0, PLANE_Z),
                config.particle_mass,
            );
        }
        let tree = Quadtree::new(config.domain, config.leaf_capacity, config.max_depth);
        let smoother = TimestepSmoother::new(config.dt_history_cap, config.dt_outlier_factor);
        Self {
            particles,
            tree,
            config,
            smoother,
            rng,
        }
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.particles
    }

    pub fn tree(&self) -> &Quadtree {
        &self.tree
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Append a particle at rest at the given xy position (z is pinned to
    /// the simulation plane). Used by the input loop on pointer spawn.
    pub fn spawn_particle(&mut self, position: Vec3) {
        self.particles.push(
            Vec3::new(position.x, position.y, PLANE_Z),
            self.config.particle_mass,
        );
    }

    /// One physics tick.
    ///
    /// Rebuilds the quadtree, smooths the raw frame delta, runs both solver
    /// passes, resolves wall penetration and integrates. A malformed delta
    /// (>= 2 seconds raw, i.e. >= 1 after the 0.5 damping) skips everything
    /// past the rebuild.
    pub fn tick(&mut self, raw_dt: f32) {
        self.rebuild_tree();

        let Some(sim_dt) = self.smoother.feed(raw_dt * 0.5) else {
            return;
        };
        if sim_dt < 1.0e-9 {
            return;
        }

        solver::compute_density_pressure(&mut self.particles, &self.tree, &self.config);
        solver::compute_forces(&mut self.particles, &self.tree, &self.config);
        solver::apply_wall_collisions(&mut self.particles, &self.config);

        self.integrate(sim_dt);
    }

    fn rebuild_tree(&mut self) {
        self.tree.clear();
        for i in 0..self.particles.len() {
            self.tree.insert(i as u32, self.particles.position[i]);
        }
    }

    /// Advance positions with the smoothed timestep, deriving velocity from
    /// the realized position delta so it stays consistent with whatever
    /// position actually got applied, including respawn overrides.
    fn integrate(&mut self, dt: f32) {
        let domain = *self.tree.boundary();
        let jitter = self.config.respawn_jitter;

        for i in 0..self.particles.len() {
            let pos = self.particles.position[i];
            let mut new_pos =
                pos + self.particles.velocity[i] * dt + self.particles.acceleration[i] * dt * dt;
            let mut new_vel = (new_pos - pos) / dt;

            // Hard reset for escapees and numeric blow-ups: jitter near the
            // origin with zero velocity, rather than clamping or reflecting.
            if !domain.contains(new_pos) || !new_pos.is_finite() {
                new_pos = Vec3::new(
                    self.rng.random_range(-jitter..=jitter),
                    self.rng.random_range(-jitter..=jitter),
                    PLANE_Z,
                );
                new_vel = Vec3::ZERO;
            }

            self.particles.position[i] = new_pos;
            self.particles.velocity[i] = new_vel;
        }
    }
}
