//! Geographic distribution of a clade.

/// A `<distribution>` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    /// Free-text description, e.g. `Africa`
    pub desc: Option<String>,

    pub points: Vec<Point>,

    pub polygons: Vec<Polygon>,
}

/// A geographic coordinate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    /// `geodetic_datum` attribute, e.g. `WGS84`
    pub geodetic_datum: Option<String>,

    /// `alt_unit` attribute
    pub alt_unit: Option<String>,

    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub alt: Option<f64>,
}

impl Point {
    /// Creates a WGS84 point without altitude.
    pub fn wgs84(lat: f64, long: f64) -> Self {
        Self {
            geodetic_datum: Some("WGS84".to_string()),
            alt_unit: None,
            lat: Some(lat),
            long: Some(long),
            alt: None,
        }
    }
}

/// Closed area given by at least three points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    /// Minimum number of points in a well-formed polygon.
    pub const MIN_POINTS: usize = 3;

    pub fn is_well_formed(&self) -> bool {
        self.points.len() >= Self::MIN_POINTS
    }
}
