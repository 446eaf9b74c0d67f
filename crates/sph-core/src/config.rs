use crate::bounds::Aabb;
use glam::Vec3;

/// Static half-plane wall: everything on the `normal` side of `point` is
/// inside the fluid domain.
#[derive(Clone, Copy, Debug)]
pub struct Wall {
    pub normal: Vec3,
    pub point: Vec3,
}

/// Simulation parameters, constructed once at startup and passed by
/// reference into the solver and integrator. Defaults are tuned for water
/// at interactive particle counts; y points down in screen space, so
/// gravity is positive and the floor sits at y = +0.4.
pub struct SimConfig {
    /// Kernel support radius `h` in domain units.
    pub smoothing_radius: f32,
    /// Gas constant in the pressure state equation.
    pub gas_stiffness: f32,
    /// Rest density of the fluid (kg/m^3).
    pub rest_density: f32,
    /// Uniform mass assigned to each particle (kg).
    pub particle_mass: f32,
    pub viscosity: f32,
    pub surface_tension: f32,
    /// Minimum color-field normal magnitude for surface tension to act.
    pub surface_threshold: f32,
    /// Gravitational acceleration, applied along +y (screen-space down).
    pub gravity: f32,
    /// Scale on the reflected normal velocity at a wall.
    pub restitution: f32,
    /// Collision margin added to wall penetration depth.
    pub particle_radius: f32,
    /// Neighbor query half-extent as a multiple of `smoothing_radius`.
    /// Must be >= 1 so the query box covers the kernel support; wider is
    /// correct but slower.
    pub query_radius_scale: f32,
    /// Density floor applied before any division by density.
    pub min_density: f32,
    pub walls: [Wall; 3],
    /// Root boundary of the quadtree; also the respawn containment region.
    pub domain: Aabb,
    /// Half-width of the uniform respawn jitter around the origin.
    pub respawn_jitter: f32,
    pub initial_particles: usize,
    pub leaf_capacity: usize,
    pub max_depth: u32,
    /// Capacity of the timestep smoothing history.
    pub dt_history_cap: usize,
    /// Raw samples above this multiple of the current average are rejected.
    pub dt_outlier_factor: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            smoothing_radius: 0.0457,
            gas_stiffness: 3.0,
            rest_density: 998.29,
            particle_mass: 0.02,
            viscosity: 3.5,
            surface_tension: 0.0728,
            surface_threshold: 0.01,
            gravity: 9.80665,
            restitution: 1.9,
            particle_radius: 0.01,
            query_radius_scale: 6.0,
            min_density: 1.0e-6,
            walls: [
                Wall {
                    normal: Vec3::new(1.0, 0.0, 0.0),
                    point: Vec3::new(-0.4, 0.0, 0.0),
                },
                Wall {
                    normal: Vec3::new(-1.0, 0.0, 0.0),
                    point: Vec3::new(0.4, 0.0, 0.0),
                },
                Wall {
                    normal: Vec3::new(0.0, -1.0, 0.0),
                    point: Vec3::new(0.0, 0.4, 0.0),
                },
            ],
            domain: Aabb::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
            respawn_jitter: 0.2,
            initial_particles: 2,
            leaf_capacity: 8,
            max_depth: 16,
            dt_history_cap: 50,
            dt_outlier_factor: 5.0,
        }
    }
}
