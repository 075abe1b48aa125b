//! A single recorded shot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lateral direction of a miss as entered at the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Apply this direction to an absolute miss distance.
    ///
    /// Left misses are negative, right misses positive.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            Direction::Left => -magnitude.abs(),
            Direction::Right => magnitude.abs(),
        }
    }
}

/// One recorded attempt with a club.
///
/// The `id` only keeps display lists stable. It is regenerated on decode and
/// ignored by equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    #[serde(skip, default = "Uuid::new_v4")]
    id: Uuid,
    /// Club label, matching a catalog or user-defined club.
    pub club: String,
    /// Carry distance in yards.
    pub distance: f64,
    /// Signed lateral miss in feet (negative = left).
    pub deviation: f64,
}

impl Shot {
    /// Create a shot with a signed deviation.
    pub fn new(club: impl Into<String>, distance: f64, deviation: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            club: club.into(),
            distance,
            deviation,
        }
    }

    /// Create a shot from an absolute miss plus the side it missed on.
    pub fn with_direction(
        club: impl Into<String>,
        distance: f64,
        miss: f64,
        direction: Direction,
    ) -> Self {
        Self::new(club, distance, direction.signed(miss))
    }

    /// Display identifier for this shot.
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl PartialEq for Shot {
    fn eq(&self, other: &Self) -> bool {
        self.club == other.club
            && self.distance == other.distance
            && self.deviation == other.deviation
    }
}
