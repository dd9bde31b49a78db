//! Layout orientation.
//!
//! A layered layout has two axes. Nodes of one rank spread along the
//! *primary* axis, and ranks stack along the *secondary* axis:
//!
//! | orientation  | primary (within a rank) | secondary (rank) |
//! |--------------|-------------------------|------------------|
//! | `Vertical`   | x                       | y                |
//! | `Horizontal` | y                       | x                |

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Direction in which ranks are stacked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Ranks stack top to bottom.
    #[default]
    Vertical,
    /// Ranks stack left to right.
    Horizontal,
}

impl Orientation {
    /// Returns the coordinate of `point` along the primary axis.
    pub fn primary(self, point: Point) -> f32 {
        match self {
            Self::Vertical => point.x(),
            Self::Horizontal => point.y(),
        }
    }

    /// Returns the coordinate of `point` along the secondary (rank) axis.
    pub fn secondary(self, point: Point) -> f32 {
        match self {
            Self::Vertical => point.y(),
            Self::Horizontal => point.x(),
        }
    }

    /// Builds a point from its primary and secondary coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topolayer_core::{geometry::Point, orientation::Orientation};
    /// assert_eq!(Orientation::Vertical.point(1.0, 2.0), Point::new(1.0, 2.0));
    /// assert_eq!(Orientation::Horizontal.point(1.0, 2.0), Point::new(2.0, 1.0));
    /// ```
    pub fn point(self, primary: f32, secondary: f32) -> Point {
        match self {
            Self::Vertical => Point::new(primary, secondary),
            Self::Horizontal => Point::new(secondary, primary),
        }
    }

    /// Moves `point` by `delta` along the primary axis.
    pub fn shift_primary(self, point: Point, delta: f32) -> Point {
        self.point(self.primary(point) + delta, self.secondary(point))
    }

    /// Moves `point` by `delta` along the secondary axis.
    pub fn shift_secondary(self, point: Point, delta: f32) -> Point {
        self.point(self.primary(point), self.secondary(point) + delta)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(format!(
                "unknown orientation `{other}`, expected `vertical` or `horizontal`"
            )),
        }
    }
}
