use nalgebra::Vector2;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::utils::{
    constants::{EARTH_RADIUS_M, NM_PER_DEGREE_LATITUDE, NM_PER_METER},
    errors::SimError,
    math::{deg_to_rad, normalize_heading, rad_to_deg},
};

/// A point on the earth in decimal degrees.
///
/// Parses from either dotted degrees/minutes/seconds
/// (`N040.37.41.000,W073.46.20.227`) or decimal (`40.628,-73.772`) form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLong {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

fn parse_dotted(component: &str) -> Option<f64> {
    let mut chars = component.chars();
    let hemisphere = chars.next()?;
    let sign = match hemisphere.to_ascii_uppercase() {
        'N' | 'E' => 1.0,
        'S' | 'W' => -1.0,
        _ => return None,
    };

    let fields: Vec<&str> = chars.as_str().split('.').collect();
    if fields.len() != 4 {
        return None;
    }
    let deg: f64 = fields[0].parse().ok()?;
    let min: f64 = fields[1].parse().ok()?;
    let sec: f64 = fields[2].parse().ok()?;
    let millis: f64 = fields[3].parse().ok()?;
    Some(sign * (deg + min / 60.0 + (sec + millis / 1000.0) / 3600.0))
}

impl FromStr for LatLong {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| SimError::LatLongParse(s.to_string()))?;
        let (lat, lon) = (lat.trim(), lon.trim());

        if let (Some(latitude), Some(longitude)) = (parse_dotted(lat), parse_dotted(lon)) {
            return Ok(LatLong::new(latitude, longitude));
        }

        match (lat.parse::<f64>(), lon.parse::<f64>()) {
            (Ok(latitude), Ok(longitude))
                if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
            {
                Ok(LatLong::new(latitude, longitude))
            }
            _ => Err(SimError::LatLongParse(s.to_string())),
        }
    }
}

impl fmt::Display for LatLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl Serialize for LatLong {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LatLong {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Great-circle distance in nautical miles.
pub fn nm_distance(a: LatLong, b: LatLong) -> f64 {
    let (lat1, lon1) = (deg_to_rad(a.latitude), deg_to_rad(a.longitude));
    let (lat2, lon2) = (deg_to_rad(b.latitude), deg_to_rad(b.longitude));
    let (dlat, dlon) = (lat2 - lat1, lon2 - lon1);

    let x = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * x.sqrt().atan2((1.0 - x).sqrt());
    EARTH_RADIUS_M * c * NM_PER_METER
}

/// Local flat-earth frame used by the flight model.
///
/// Positions are mapped to nautical miles with a fixed scale for longitude,
/// and headings are magnetic: true bearing plus `magnetic_variation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavFrame {
    pub nm_per_longitude: f64,
    pub magnetic_variation: f64,
}

impl NavFrame {
    pub fn new(nm_per_longitude: f64, magnetic_variation: f64) -> Self {
        Self {
            nm_per_longitude,
            magnetic_variation,
        }
    }

    /// Frame centred on `center`, where a degree of longitude spans
    /// `60 * cos(latitude)` nm.
    pub fn centered_on(center: LatLong, magnetic_variation: f64) -> Self {
        Self::new(
            NM_PER_DEGREE_LATITUDE * deg_to_rad(center.latitude).cos(),
            magnetic_variation,
        )
    }

    pub fn to_nm(&self, p: LatLong) -> Vector2<f64> {
        Vector2::new(
            p.longitude * self.nm_per_longitude,
            p.latitude * NM_PER_DEGREE_LATITUDE,
        )
    }

    pub fn from_nm(&self, v: Vector2<f64>) -> LatLong {
        LatLong::new(v.y / NM_PER_DEGREE_LATITUDE, v.x / self.nm_per_longitude)
    }

    /// Magnetic bearing from `from` to `to`.
    pub fn heading(&self, from: LatLong, to: LatLong) -> f64 {
        let v = self.to_nm(to) - self.to_nm(from);
        // atan2(x, y) measures clockwise from north
        normalize_heading(rad_to_deg(v.x.atan2(v.y)) + self.magnetic_variation)
    }

    /// Unit vector (east, north) for a magnetic heading.
    pub fn heading_vector(&self, heading: f64) -> Vector2<f64> {
        let true_heading = deg_to_rad(heading - self.magnetic_variation);
        Vector2::new(true_heading.sin(), true_heading.cos())
    }
}

/// Signed distance from `p` to the infinite line through `p0` and `p1`.
pub fn signed_point_line_distance(p: Vector2<f64>, p0: Vector2<f64>, p1: Vector2<f64>) -> f64 {
    let d = p1 - p0;
    let len = d.norm();
    if len == 0.0 {
        return f64::INFINITY;
    }
    (d.x * (p0.y - p.y) - d.y * (p0.x - p.x)) / len
}

/// Parameter `t` at which the ray `origin + t * dir` meets the line through
/// `a` and `b`, or `None` when they are parallel.
pub fn ray_line_intersection(
    origin: Vector2<f64>,
    dir: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
) -> Option<f64> {
    let e = b - a;
    let denom = dir.perp(&e);
    if denom.abs() < 1e-9 {
        return None;
    }
    Some((a - origin).perp(&e) / denom)
}
