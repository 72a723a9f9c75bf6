use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    /// Kavrayskiy VII pseudocylindrical world projection.
    Kavrayskiy7,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub kind: ProjectionKind,
    /// Longitude at the center of the map, in degrees.
    pub central_longitude: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Projection {
            kind: ProjectionKind::Kavrayskiy7,
            central_longitude: -90.0,
        }
    }
}

impl Projection {
    /// Projects a point given in degrees to map units (radians scale).
    ///
    /// `y` grows northward. Latitudes are clamped to [-90, 90].
    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let phi = latitude.clamp(-90.0, 90.0).to_radians();
        let lambda = self.relative_longitude(longitude).to_radians();

        match self.kind {
            ProjectionKind::Kavrayskiy7 => {
                let x = 3.0 * lambda / (2.0 * PI) * (PI * PI / 3.0 - phi * phi).sqrt();
                (x, phi)
            }
        }
    }

    /// Half the map width at a latitude given in radians.
    pub fn half_width(&self, phi: f64) -> f64 {
        let phi = phi.clamp(-PI / 2.0, PI / 2.0);
        match self.kind {
            ProjectionKind::Kavrayskiy7 => 1.5 * (PI * PI / 3.0 - phi * phi).sqrt(),
        }
    }

    /// Half extents of the whole map, `(x, y)`.
    pub fn extent(&self) -> (f64, f64) {
        (self.half_width(0.0), PI / 2.0)
    }

    /// Longitude offset from the central meridian, in [-180, 180).
    fn relative_longitude(&self, longitude: f64) -> f64 {
        (longitude - self.central_longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}
