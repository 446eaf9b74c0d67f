use glam::Vec3;

/// SoA particle storage.
///
/// `density`, `pressure`, `acceleration` and `surface_normal` are derived
/// values recomputed by the solver every tick; nothing may rely on them
/// across ticks.
pub struct ParticleSet {
    pub position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    pub acceleration: Vec<Vec3>,
    pub mass: Vec<f32>,
    pub density: Vec<f32>,
    pub pressure: Vec<f32>,
    /// Negated color-field gradient; its magnitude gates surface tension.
    pub surface_normal: Vec<Vec3>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self {
            position: Vec::new(),
            velocity: Vec::new(),
            acceleration: Vec::new(),
            mass: Vec::new(),
            density: Vec::new(),
            pressure: Vec::new(),
            surface_normal: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Append a particle at rest. Derived fields start at zero and are
    /// filled in by the next solver pass.
    pub fn push(&mut self, position: Vec3, mass: f32) {
        self.position.push(position);
        self.velocity.push(Vec3::ZERO);
        self.acceleration.push(Vec3::ZERO);
        self.mass.push(mass);
        self.density.push(0.0);
        self.pressure.push(0.0);
        self.surface_normal.push(Vec3::ZERO);
    }
}

impl Default for ParticleSet {
    fn default() -> Self {
        Self::new()
    }
}
