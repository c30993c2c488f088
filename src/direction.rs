//! Logical steering directions.

/// A steering direction, for callers that drive a servo by direction rather than raw angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// No direction.
    #[default]
    Nil,
    /// Steer left.
    Left,
    /// Steer right.
    Right,
    /// Hold the center.
    Straight,
}

impl Direction {
    /// The mirrored direction: left and right swap, straight and nil stay put.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Straight => Self::Straight,
            Self::Nil => Self::Nil,
        }
    }
}

impl core::ops::Not for Direction {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.inverted()
    }
}
