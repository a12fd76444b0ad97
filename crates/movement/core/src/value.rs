//! Magnitude kinds that elements can carry.
//!
//! One generic element type covers both the scalar speed case and the
//! vector direction case. [`ElementValue`] is the seam: anything summable
//! and scalable by a whole stack count qualifies.

use core::fmt::Debug;
use core::ops::Add;

use glam::{Vec2, Vec3};

/// Magnitude carried by a stackable element.
///
/// An element contributes `value × stack` to its registry's aggregate, so a
/// magnitude only needs an additive identity and whole-count scaling.
/// Implemented for `f32`/`f64` scalars and the glam vectors.
pub trait ElementValue: Copy + PartialEq + Debug + Add<Output = Self> {
    /// Additive identity; the aggregate of an empty registry.
    const ZERO: Self;

    /// This value repeated `stacks` times.
    fn scaled(self, stacks: i32) -> Self;
}

impl ElementValue for f32 {
    const ZERO: Self = 0.0;

    fn scaled(self, stacks: i32) -> Self {
        self * stacks as f32
    }
}

impl ElementValue for f64 {
    const ZERO: Self = 0.0;

    fn scaled(self, stacks: i32) -> Self {
        self * stacks as f64
    }
}

impl ElementValue for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    fn scaled(self, stacks: i32) -> Self {
        self * stacks as f32
    }
}

impl ElementValue for Vec3 {
    const ZERO: Self = Vec3::ZERO;

    fn scaled(self, stacks: i32) -> Self {
        self * stacks as f32
    }
}
