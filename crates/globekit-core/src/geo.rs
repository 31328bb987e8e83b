//! Geographic and geometry math for the globe surface.
//!
//! Surface points are earth-centered, earth-fixed (ECEF) coordinates in
//! meters on the WGS84 ellipsoid; geographic coordinates are
//! (longitude, latitude) pairs in degrees. All conversions are pure and
//! total over finite inputs.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis in meters.
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// First eccentricity squared, `f * (2 - f)`.
const ECCENTRICITY_SQ: f64 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);

/// A (longitude, latitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geographic {
    pub longitude: f64,
    pub latitude: f64,
}

impl Geographic {
    /// Creates a geographic coordinate from degrees.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Converts to a surface point on the ellipsoid (height 0).
    pub fn to_surface(&self) -> SurfacePoint {
        SurfacePoint::from_geographic(*self)
    }
}

/// A 3-D point on or above the globe surface (ECEF meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SurfacePoint {
    /// Creates a surface point from ECEF coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Places a geographic coordinate on the WGS84 ellipsoid surface.
    pub fn from_geographic(geo: Geographic) -> Self {
        let lon = geo.longitude.to_radians();
        let lat = geo.latitude.to_radians();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();

        // Prime vertical radius of curvature.
        let n = WGS84_SEMI_MAJOR_AXIS / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();

        Self {
            x: n * cos_lat * lon.cos(),
            y: n * cos_lat * lon.sin(),
            z: n * (1.0 - ECCENTRICITY_SQ) * sin_lat,
        }
    }

    /// Converts to geographic degrees using Bowring's method.
    ///
    /// Accurate to well under a millimeter for points on or near the
    /// surface. Points on the rotation axis resolve to the poles with
    /// longitude 0.
    pub fn to_geographic(&self) -> Geographic {
        let a = WGS84_SEMI_MAJOR_AXIS;
        let b = a * (1.0 - WGS84_FLATTENING);
        let e2 = ECCENTRICITY_SQ;
        let ep2 = e2 / (1.0 - e2);

        let p = (self.x * self.x + self.y * self.y).sqrt();
        if p < 1e-9 {
            let latitude = if self.z >= 0.0 { 90.0 } else { -90.0 };
            return Geographic::new(0.0, latitude);
        }

        let theta = (self.z * a).atan2(p * b);
        let (sin_t, cos_t) = theta.sin_cos();
        let lat = (self.z + ep2 * b * sin_t.powi(3)).atan2(p - e2 * a * cos_t.powi(3));
        let lon = self.y.atan2(self.x);

        Geographic::new(lon.to_degrees(), lat.to_degrees())
    }

    /// Componentwise midpoint of two points.
    pub fn midpoint(a: &SurfacePoint, b: &SurfacePoint) -> SurfacePoint {
        let m = (a.as_vector() + b.as_vector()) * 0.5;
        SurfacePoint::new(m.x, m.y, m.z)
    }

    /// Euclidean distance to another point in meters.
    pub fn distance(&self, other: &SurfacePoint) -> f64 {
        (self.as_vector() - other.as_vector()).norm()
    }

    /// Reports whether all components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Axis-aligned rectangle in geographic space, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoRectangle {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoRectangle {
    /// Builds the bounds spanned by two diagonal corners.
    pub fn from_corners(a: Geographic, b: Geographic) -> Self {
        Self {
            west: a.longitude.min(b.longitude),
            south: a.latitude.min(b.latitude),
            east: a.longitude.max(b.longitude),
            north: a.latitude.max(b.latitude),
        }
    }

    /// Builds the bounds spanned by two diagonal surface points.
    pub fn from_surface_corners(a: &SurfacePoint, b: &SurfacePoint) -> Self {
        Self::from_corners(a.to_geographic(), b.to_geographic())
    }
}

/// Closed 5-point outline ring of the axis-aligned rectangle between two
/// diagonal geographic corners.
///
/// The ring traces the boundary in geographic space
/// (start → (lon2, lat1) → end → (lon1, lat2) → start) so it follows the
/// curved surface instead of cutting straight lines between the dragged
/// corners.
pub fn rectangle_outline_ring_geographic(start: Geographic, end: Geographic) -> Vec<SurfacePoint> {
    vec![
        Geographic::new(start.longitude, start.latitude).to_surface(),
        Geographic::new(end.longitude, start.latitude).to_surface(),
        Geographic::new(end.longitude, end.latitude).to_surface(),
        Geographic::new(start.longitude, end.latitude).to_surface(),
        Geographic::new(start.longitude, start.latitude).to_surface(),
    ]
}

/// [`rectangle_outline_ring_geographic`] for surface-point corners.
pub fn rectangle_outline_ring(start: &SurfacePoint, end: &SurfacePoint) -> Vec<SurfacePoint> {
    rectangle_outline_ring_geographic(start.to_geographic(), end.to_geographic())
}

/// Representative center of the rectangle spanned by two corners.
///
/// Averages the midpoints of the two latitude edges rather than taking the
/// straight 3-D midpoint of the dragged corners, which sits visibly
/// off-center on a curved surface.
pub fn rectangle_center(start: Geographic, end: Geographic) -> SurfacePoint {
    let top = SurfacePoint::midpoint(
        &Geographic::new(start.longitude, start.latitude).to_surface(),
        &Geographic::new(end.longitude, start.latitude).to_surface(),
    );
    let bottom = SurfacePoint::midpoint(
        &Geographic::new(start.longitude, end.latitude).to_surface(),
        &Geographic::new(end.longitude, end.latitude).to_surface(),
    );
    SurfacePoint::midpoint(&top, &bottom)
}

/// Center of a bounding sphere over the given points (Ritter's algorithm).
///
/// Used as the anchor position of a finished polygon. Returns the origin
/// for an empty slice.
pub fn bounding_sphere_center(points: &[SurfacePoint]) -> SurfacePoint {
    let Some(first) = points.first() else {
        return SurfacePoint::new(0.0, 0.0, 0.0);
    };

    // Farthest point from an arbitrary start, then farthest from that.
    let p1 = farthest_from(first, points);
    let p2 = farthest_from(&p1, points);

    let mut center = (p1.as_vector() + p2.as_vector()) * 0.5;
    let mut radius = (p2.as_vector() - center).norm();

    // Grow the sphere to cover outliers.
    for p in points {
        let offset = p.as_vector() - center;
        let dist = offset.norm();
        if dist > radius {
            let new_radius = (radius + dist) * 0.5;
            center += offset * ((new_radius - radius) / dist);
            radius = new_radius;
        }
    }

    SurfacePoint::new(center.x, center.y, center.z)
}

fn farthest_from(origin: &SurfacePoint, points: &[SurfacePoint]) -> SurfacePoint {
    let mut best = *origin;
    let mut best_dist = 0.0;
    for p in points {
        let d = origin.distance(p);
        if d > best_dist {
            best_dist = d;
            best = *p;
        }
    }
    best
}
