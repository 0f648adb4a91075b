//! Great-circle distance between resolved points.

use std::fmt;

use mapmark_providers::Coordinate;

/// Mean Earth radius used for haversine distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2, lon2) = (b.latitude.to_radians(), b.longitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance rounded to the nearest whole kilometer, as displayed.
pub fn rounded_distance_km(a: Coordinate, b: Coordinate) -> u64 {
    distance_km(a, b).round() as u64
}

/// What the distance label shows after a redraw.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceReadout {
    Km(u64),
    #[default]
    NotAvailable,
}

impl DistanceReadout {
    /// Available only when both endpoints are.
    pub fn between(from: Option<Coordinate>, to: Option<Coordinate>) -> Self {
        match (from, to) {
            (Some(a), Some(b)) => Self::Km(rounded_distance_km(a, b)),
            _ => Self::NotAvailable,
        }
    }

    pub const fn km(self) -> Option<u64> {
        match self {
            Self::Km(km) => Some(km),
            Self::NotAvailable => None,
        }
    }

    pub const fn is_available(self) -> bool {
        matches!(self, Self::Km(_))
    }
}

impl fmt::Display for DistanceReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Km(km) => write!(f, "Distance: {km} km"),
            Self::NotAvailable => write!(f, "Distance: N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_YORK: Coordinate = Coordinate::new(40.7128, -74.0060);
    const LOS_ANGELES: Coordinate = Coordinate::new(34.0522, -118.2437);
    const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);
    const LONDON: Coordinate = Coordinate::new(51.5074, -0.1278);

    #[test]
    fn test_new_york_to_los_angeles() {
        assert_eq!(rounded_distance_km(NEW_YORK, LOS_ANGELES), 3936);
    }

    #[test]
    fn test_paris_to_london() {
        assert_eq!(rounded_distance_km(PARIS, LONDON), 344);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            (NEW_YORK, LOS_ANGELES),
            (PARIS, LONDON),
            (Coordinate::new(-33.8688, 151.2093), Coordinate::new(64.1466, -21.9426)),
            (Coordinate::new(89.9, 0.0), Coordinate::new(-89.9, 180.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance_km(a, b), distance_km(b, a));
        }
    }

    #[test]
    fn test_zero_for_same_point() {
        for point in [NEW_YORK, PARIS, Coordinate::new(0.0, 0.0), Coordinate::new(90.0, 45.0)] {
            assert_eq!(distance_km(point, point), 0.0);
        }
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_readout() {
        assert_eq!(
            DistanceReadout::between(Some(NEW_YORK), Some(LOS_ANGELES)),
            DistanceReadout::Km(3936)
        );
        assert_eq!(
            DistanceReadout::between(None, Some(PARIS)),
            DistanceReadout::NotAvailable
        );
        assert_eq!(DistanceReadout::Km(3936).to_string(), "Distance: 3936 km");
        assert_eq!(DistanceReadout::NotAvailable.to_string(), "Distance: N/A");
        assert_eq!(DistanceReadout::NotAvailable.km(), None);
    }
}
