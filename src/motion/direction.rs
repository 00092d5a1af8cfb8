//! Rotation sense and how index deltas are chosen.

use serde::Deserialize;

/// Direction of rotor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive step count).
    Clockwise,
    /// Counter-clockwise (negative step count).
    CounterClockwise,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// How a requested index change becomes a rotation.
///
/// Fixed per build; the flap mechanism of most displays only tolerates one
/// sense of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
    /// Always rotate clockwise, delta in `[0, N)`.
    #[default]
    Forward,
    /// Always rotate counter-clockwise, delta in `[0, N)`.
    Reverse,
    /// Rotate whichever way is shorter, delta in `(-N/2, N/2]`.
    ShortestPath,
}

impl DirectionPolicy {
    /// Signed index delta taking `current` to `target` on a rotor of `size` faces.
    ///
    /// Positive deltas advance the index. For the unidirectional policies the
    /// result is always in `[0, size)`.
    pub fn delta(self, current: u16, target: u16, size: u16) -> i32 {
        let n = i32::from(size.max(1));
        let forward = (i32::from(target) - i32::from(current)).rem_euclid(n);
        match self {
            DirectionPolicy::Forward | DirectionPolicy::Reverse => forward,
            DirectionPolicy::ShortestPath => {
                if forward * 2 > n {
                    forward - n
                } else {
                    forward
                }
            }
        }
    }

    /// Physical rotation for an index-advancing move.
    #[inline]
    pub fn advance_direction(self) -> Direction {
        match self {
            DirectionPolicy::Forward | DirectionPolicy::ShortestPath => Direction::Clockwise,
            DirectionPolicy::Reverse => Direction::CounterClockwise,
        }
    }
}
