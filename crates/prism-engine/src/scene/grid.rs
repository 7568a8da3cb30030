use crate::math::Vec3;

/// Integer lattice coordinate of an instance.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridCoord {
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// 3-D lattice of instances centered on the origin.
///
/// Instances are numbered x-fastest: the index carries into `y` every `rows`
/// instances and into `z` every `rows * columns`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InstanceGrid {
    /// Count along X.
    pub rows: u32,
    /// Count along Y.
    pub columns: u32,
    /// Count along Z.
    pub depth: u32,
    /// Distance between neighbouring instance centers.
    pub spacing: f32,
}

impl InstanceGrid {
    pub const fn new(rows: u32, columns: u32, depth: u32, spacing: f32) -> Self {
        Self {
            rows,
            columns,
            depth,
            spacing,
        }
    }

    /// Total instance count.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows as usize * self.columns as usize * self.depth as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn coord(&self, index: usize) -> GridCoord {
        debug_assert!(index < self.len(), "instance {index} outside grid");
        let rows = self.rows as usize;
        let plane = rows * self.columns as usize;
        GridCoord {
            x: (index % rows) as u32,
            y: ((index / rows) % self.columns as usize) as u32,
            z: (index / plane) as u32,
        }
    }

    /// Center of the instance at `c`, relative to the lattice center.
    pub fn offset(&self, c: GridCoord) -> Vec3 {
        let half = self.spacing * 0.5;
        let axis = |coord: u32, count: u32| (coord as f32 - count as f32 / 2.0) * self.spacing + half;
        Vec3::new(
            axis(c.x, self.rows),
            axis(c.y, self.columns),
            axis(c.z, self.depth),
        )
    }

    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.len()).map(|i| self.coord(i))
    }
}
