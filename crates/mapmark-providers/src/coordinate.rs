use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Shift by a fixed number of degrees on each axis.
    ///
    /// The shift is not distance-corrected, so the same offset covers less
    /// ground east-west the closer the point is to a pole.
    pub fn offset(self, d_lat: f64, d_lon: f64) -> Self {
        Self::new(self.latitude + d_lat, self.longitude + d_lon)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_constant_degree() {
        let base = Coordinate::new(10.0, 20.0);
        let shifted = base.offset(0.01, -0.01);
        assert!((shifted.latitude - 10.01).abs() < 1e-12);
        assert!((shifted.longitude - 19.99).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let coord = Coordinate::from((48.8566, 2.3522));
        assert_eq!(coord.to_string(), "(48.856600, 2.352200)");
    }
}
