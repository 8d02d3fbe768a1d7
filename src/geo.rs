//! Coordinates and point-to-point distances.
//!
//! Coordinates carry named longitude/latitude fields in degrees. Raw
//! tables are read as `(longitude, latitude)` through
//! [`Coordinate::from_lon_lat`], and the distance functions only ever read
//! the named fields, so argument order cannot drift between the two.

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

/// A point on the sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Longitude in degrees, east positive.
    pub lon: f64,
    /// Latitude in degrees, north positive.
    pub lat: f64,
}

impl Coordinate {
    pub const fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }

    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }
}

/// Great-circle distance via the spherical law of cosines.
///
/// The cosine argument is clamped to `[-1, 1]` so coincident and
/// antipodal points never produce `NaN`.
///
/// # Examples
///
/// ```
/// use u_anneal_route::geo::{great_circle_distance, Coordinate, EARTH_RADIUS_MILES};
///
/// let a = Coordinate::from_lon_lat(0.0, 0.0);
/// let b = Coordinate::from_lon_lat(90.0, 0.0);
/// let quarter = std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_MILES;
/// assert!((great_circle_distance(a, b, EARTH_RADIUS_MILES) - quarter).abs() < 1e-9);
/// ```
pub fn great_circle_distance(a: Coordinate, b: Coordinate, radius: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    let (lat_a, lat_b) = (a.lat_rad(), b.lat_rad());
    // abs() keeps the expression bit-for-bit symmetric in a and b
    let dlon = (a.lon_rad() - b.lon_rad()).abs();
    let cos_angle = lat_a.sin() * lat_b.sin() + lat_a.cos() * lat_b.cos() * dlon.cos();
    cos_angle.clamp(-1.0, 1.0).acos() * radius
}

/// Planar distance treating degrees as plain Cartesian units.
pub fn euclidean_distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.lon - b.lon).hypot(a.lat - b.lat)
}

/// How the distance matrix measures the gap between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Metric {
    /// Great-circle distance on a sphere of the given radius.
    GreatCircle { radius: f64 },
    /// Straight-line distance in the coordinate plane.
    Euclidean,
}

impl Default for Metric {
    fn default() -> Self {
        Metric::GreatCircle {
            radius: EARTH_RADIUS_MILES,
        }
    }
}

impl Metric {
    pub fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        match *self {
            Metric::GreatCircle { radius } => great_circle_distance(a, b, radius),
            Metric::Euclidean => euclidean_distance(a, b),
        }
    }
}
