use crate::Vec3;

/// Axis-aligned bounds of one or more position streams.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extents {
    pub min: Vec3,
    pub max: Vec3,
}

impl Extents {
    /// Union identity, and what an empty position stream folds to. Callers
    /// check [`Extents::is_empty`] before deriving scene fitting from it.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Component-wise bounds of a flat xyz stream, seeded from its first
    /// vertex.
    pub fn from_positions(positions: &[f32]) -> Self {
        let mut chunks = positions.chunks_exact(3);
        let Some(first) = chunks.next() else {
            return Self::EMPTY;
        };
        let first = Vec3::new(first[0], first[1], first[2]);
        let mut extents = Self {
            min: first,
            max: first,
        };
        for chunk in chunks {
            let v = Vec3::new(chunk[0], chunk[1], chunk[2]);
            extents.min = extents.min.min(v);
            extents.max = extents.max.max(v);
        }
        extents
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True when no vertex has been folded in (min still above max).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    #[inline]
    pub fn range(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.min + self.range() * 0.5
    }

    /// Diagonal length, the scale camera distance is derived from.
    #[inline]
    pub fn diagonal(&self) -> f32 {
        self.range().length()
    }
}
