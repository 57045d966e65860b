//! 2-component float vector.
//!
//! Used for window sizes and per-axis pixel scale factors. Deliberately
//! minimal: access and assignment only, no arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A 2D vector with `x` and `y` components.
///
/// Components are addressable by field or by index, and both paths observe
/// the same storage: `v[0]` is `v.x`, `v[1]` is `v.y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Vec2 {
    #[inline]
    fn from(a: [f32; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }
}

impl Index<usize> for Vec2 {
    type Output = f32;

    /// Returns the component at `index` (0 = x, 1 = y).
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than 1.
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vec2 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vec2 index out of range: {index}"),
        }
    }
}
