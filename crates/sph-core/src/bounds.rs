use glam::Vec3;

/// Axis-aligned bounding box.
///
/// Containment is inclusive on all faces. The z extent is carried so boxes
/// can wrap the (constant) z component of particle positions, but the
/// quadtree only ever subdivides in x and y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube of half-extent `r` centered on `center`.
    pub fn centered(center: Vec3, r: f32) -> Self {
        Self {
            min: center - Vec3::splat(r),
            max: center + Vec3::splat(r),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// One of the four xy-quadrants of this box. The quadrants exactly tile
    /// the parent in x/y and keep the full z extent.
    ///
    /// Index layout: bit 0 = upper x half, bit 1 = upper y half.
    pub fn quadrant(&self, index: usize) -> Aabb {
        let center = self.center();
        let mut min = self.min;
        let mut max = self.max;
        if index & 1 != 0 {
            min.x = center.x;
        } else {
            max.x = center.x;
        }
        if index & 2 != 0 {
            min.y = center.y;
        } else {
            max.y = center.y;
        }
        Aabb { min, max }
    }
}
