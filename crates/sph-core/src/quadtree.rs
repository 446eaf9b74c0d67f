use crate::bounds::Aabb;
use glam::Vec3;

/// Quadtree over particle indices, rebuilt from scratch every physics tick.
///
/// A node is a leaf iff it has no children. Leaves hold `(index, position)`
/// entries; the position is captured at insert time, which is valid because
/// the tree never outlives the tick that built it. Indices point into the
/// owning `ParticleSet`, so the tree holds no references of its own.
///
/// A leaf splits into four children once it holds more than `leaf_capacity`
/// entries, unless it already sits at `max_depth`; leaves at the depth cap
/// grow without bound so that fully clustered particle sets degrade to a
/// linear scan of one leaf instead of recursing forever.
pub struct Quadtree {
    boundary: Aabb,
    leaf_capacity: usize,
    max_depth: u32,
    entries: Vec<(u32, Vec3)>,
    children: Vec<Quadtree>,
}

impl Quadtree {
    pub fn new(boundary: Aabb, leaf_capacity: usize, max_depth: u32) -> Self {
        Self {
            boundary,
            leaf_capacity,
            max_depth,
            entries: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &Aabb {
        &self.boundary
    }

    /// Child nodes, empty for a leaf. Exposed so a renderer can traverse
    /// the tree structure without the tree knowing anything about drawing.
    pub fn children(&self) -> &[Quadtree] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of stored entries in this subtree.
    pub fn len(&self) -> usize {
        self.entries.len() + self.children.iter().map(Quadtree::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries and children, keeping the root boundary.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.children.clear();
    }

    /// Insert a particle index keyed by its current position.
    ///
    /// Positions outside the root boundary are rejected (returns `false`);
    /// the integrator's respawn policy keeps live particles in bounds, so a
    /// rejected insert only drops the particle from neighbor queries for
    /// the tick in which that invariant was violated from outside.
    pub fn insert(&mut self, index: u32, position: Vec3) -> bool {
        if !self.boundary.contains(position) {
            return false;
        }
        self.insert_at(index, position, 0);
        true
    }

    fn insert_at(&mut self, index: u32, position: Vec3, depth: u32) {
        if !self.children.is_empty() {
            return self.route(index, position, depth);
        }

        self.entries.push((index, position));

        if self.entries.len() > self.leaf_capacity && depth < self.max_depth {
            self.subdivide(depth);
        }
    }

    /// Pass an entry down to the first child whose box contains it. Points
    /// on an interior seam are contained by more than one child; taking the
    /// first keeps insertion (and therefore query order) deterministic.
    fn route(&mut self, index: u32, position: Vec3, depth: u32) {
        for child in &mut self.children {
            if child.boundary.contains(position) {
                return child.insert_at(index, position, depth + 1);
            }
        }
        // Unreachable while children tile the parent; keep the entry rather
        // than lose it if that invariant is ever broken.
        self.entries.push((index, position));
    }

    fn subdivide(&mut self, depth: u32) {
        self.children = (0..4)
            .map(|q| Quadtree::new(self.boundary.quadrant(q), self.leaf_capacity, self.max_depth))
            .collect();
        for (index, position) in std::mem::take(&mut self.entries) {
            self.route(index, position, depth);
        }
    }

    /// Indices of every stored particle whose position lies within `range`.
    ///
    /// Only subtrees whose boundary intersects `range` are visited. Output
    /// order is depth-first over quadrants, insertion order within a leaf:
    /// deterministic for a fixed tree state.
    pub fn query_range(&self, range: &Aabb) -> Vec<u32> {
        let mut out = Vec::new();
        self.for_each_in_range(range, &mut |index| out.push(index));
        out
    }

    /// Callback form of [`query_range`](Self::query_range); avoids the
    /// per-query allocation in the solver's inner loops.
    pub fn for_each_in_range(&self, range: &Aabb, f: &mut impl FnMut(u32)) {
        if !self.boundary.intersects(range) {
            return;
        }
        for &(index, position) in &self.entries {
            if range.contains(position) {
                f(index);
            }
        }
        for child in &self.children {
            child.for_each_in_range(range, f);
        }
    }
}
