//! Runs physics, input and rendering as three independently rate-limited
//! loops over one shared [`Simulation`] behind a single exclusive lock.
//!
//! There is no reader/writer distinction and no cross-loop ordering beyond
//! mutual exclusion; each loop keeps its critical section as short as it
//! can and rate-limits itself locally. All loops poll a shared open flag
//! and exit cooperatively once the window reports closed.

use crate::bounds::Aabb;
use crate::limiter::FrameLimiter;
use crate::quadtree::Quadtree;
use crate::simulation::Simulation;
use glam::{Vec2, Vec3};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Events the core consumes from the windowing collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowEvent {
    Closed,
    PointerPressed,
    PointerReleased,
}

/// Windowing/input collaborator. Implementations own the actual window;
/// the core only sees open state, pointer transitions and pointer position.
pub trait Window {
    fn is_open(&self) -> bool;
    fn close(&mut self);
    fn poll_event(&mut self) -> Option<WindowEvent>;
    /// Pointer position in normalized window coordinates, [0, 1] on both
    /// axes with the origin at the top-left.
    fn pointer_position(&self) -> Vec2;
    /// Blocking present/display call; invoked outside the simulation lock.
    fn present(&mut self);
}

/// Rendering collaborator: a pure consumer of particle positions and leaf
/// boundaries, called once per render tick under the simulation lock.
pub trait Renderer {
    fn clear(&mut self);
    fn draw_particle(&mut self, position: Vec3);
    fn draw_leaf(&mut self, bounds: &Aabb);
}

/// Target rates and timers for the three loops.
#[derive(Clone, Copy, Debug)]
pub struct LoopConfig {
    pub physics_hz: f32,
    pub input_hz: f32,
    pub render_hz: f32,
    /// Minimum seconds between pointer-held particle spawns.
    pub spawn_debounce: f32,
    /// Period of the reserved rebuild timer in the input loop.
    pub rebuild_interval: f32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            physics_hz: 1000.0,
            input_hz: 60.0,
            render_hz: 30.0,
            spawn_debounce: 0.1,
            rebuild_interval: 0.1,
        }
    }
}

/// Cross-loop control state. The render loop writes it from window events;
/// the worker loops only read (and the input loop reads the pointer slot).
struct ControlState {
    open: AtomicBool,
    pointer_down: AtomicBool,
    pointer: Mutex<Vec2>,
}

/// Drive the simulation until the window closes.
///
/// Spawns the physics and input loops as threads, runs the render loop on
/// the calling thread, and joins the workers before returning. The caller
/// keeps ownership of the window and renderer for the whole run.
pub fn run<W: Window, R: Renderer>(
    mut window: W,
    mut renderer: R,
    simulation: Simulation,
    loops: LoopConfig,
) {
    let shared = Arc::new(Mutex::new(simulation));
    let control = Arc::new(ControlState {
        open: AtomicBool::new(true),
        pointer_down: AtomicBool::new(false),
        pointer: Mutex::new(Vec2::ZERO),
    });

    log::info!(
        "starting loops: physics {} Hz, input {} Hz, render {} Hz",
        loops.physics_hz,
        loops.input_hz,
        loops.render_hz
    );

    let physics = {
        let shared = Arc::clone(&shared);
        let control = Arc::clone(&control);
        thread::spawn(move || {
            let mut limiter = FrameLimiter::reporting(loops.physics_hz, "physics");
            while control.open.load(Ordering::Relaxed) {
                let raw_dt = limiter.start();
                shared
                    .lock()
                    .expect("simulation lock poisoned")
                    .tick(raw_dt);
                limiter.end();
            }
        })
    };

    let input = {
        let shared = Arc::clone(&shared);
        let control = Arc::clone(&control);
        thread::spawn(move || {
            let mut limiter = FrameLimiter::new(loops.input_hz);
            let mut spawn_cooldown = loops.spawn_debounce;
            let mut rebuild_cooldown = loops.rebuild_interval;

            while control.open.load(Ordering::Relaxed) {
                let dt = limiter.start();

                if control.pointer_down.load(Ordering::Relaxed) {
                    if spawn_cooldown <= 0.0 {
                        let pointer = *control.pointer.lock().expect("pointer lock poisoned");
                        let mut sim = shared.lock().expect("simulation lock poisoned");
                        let spawn_at = pointer_to_domain(pointer, sim.tree().boundary());
                        sim.spawn_particle(spawn_at);
                        drop(sim);
                        spawn_cooldown = loops.spawn_debounce;
                    } else {
                        spawn_cooldown -= dt;
                    }
                }

                // Reserved periodic-rebuild slot. The physics tick already
                // rebuilds the tree, so the timer cycles without mutating.
                if rebuild_cooldown <= 0.0 {
                    rebuild_cooldown = loops.rebuild_interval;
                } else {
                    rebuild_cooldown -= dt;
                }

                limiter.end();
            }
        })
    };

    let mut limiter = FrameLimiter::new(loops.render_hz);
    while window.is_open() {
        limiter.start();

        while let Some(event) = window.poll_event() {
            match event {
                WindowEvent::Closed => window.close(),
                WindowEvent::PointerPressed => control.pointer_down.store(true, Ordering::Relaxed),
                WindowEvent::PointerReleased => {
                    control.pointer_down.store(false, Ordering::Relaxed)
                }
            }
        }
        *control.pointer.lock().expect("pointer lock poisoned") = window.pointer_position();

        renderer.clear();
        {
            let sim = shared.lock().expect("simulation lock poisoned");
            draw_tree(&mut renderer, sim.tree());
            for &position in &sim.particles().position {
                renderer.draw_particle(position);
            }
        }
        // Present blocks; the lock is already released.
        window.present();

        limiter.end();
    }

    control.open.store(false, Ordering::Relaxed);
    physics.join().expect("physics loop panicked");
    input.join().expect("input loop panicked");
    log::info!("loops joined, shutting down");
}

/// Map a normalized [0, 1] pointer position onto the domain's xy extent.
fn pointer_to_domain(pointer: Vec2, domain: &Aabb) -> Vec3 {
    Vec3::new(
        domain.min.x + pointer.x * (domain.max.x - domain.min.x),
        domain.min.y + pointer.y * (domain.max.y - domain.min.y),
        0.0,
    )
}

/// Depth-first traversal drawing an outlined box per leaf, matching the
/// tree structure the physics loop last built.
fn draw_tree<R: Renderer>(renderer: &mut R, node: &Quadtree) {
    if node.is_leaf() {
        renderer.draw_leaf(node.boundary());
    } else {
        for child in node.children() {
            draw_tree(renderer, child);
        }
    }
}
