//! 2D smoothed particle hydrodynamics on a quadtree neighbor index.
//!
//! The simulation represents a fluid as discrete particles. Each tick the
//! quadtree is rebuilt from current positions, the solver accumulates
//! density, pressure, viscosity and surface-tension contributions from
//! neighbors inside the kernel support radius, and the integrator advances
//! positions with a smoothed timestep derived from recent frame durations.
//!
//! Physics, input and rendering run as three independently rate-limited
//! loops over one shared `Simulation` behind a single exclusive lock; see
//! [`orchestrator::run`].

pub mod bounds;
pub mod config;
pub mod kernels;
pub mod limiter;
pub mod orchestrator;
pub mod particle;
pub mod quadtree;
pub mod simulation;
pub mod solver;
pub mod timestep;

pub use bounds::Aabb;
pub use config::SimConfig;
pub use particle::ParticleSet;
pub use quadtree::Quadtree;
pub use simulation::Simulation;
