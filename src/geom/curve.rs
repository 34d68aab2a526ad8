use super::core::Point3;

pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;

    #[must_use]
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn is_closed(&self) -> bool {
        false
    }
}

/// A (p,q) torus knot around the Z axis.
///
/// `radius` is the major radius of the central loop and `tube` the radius of
/// the secondary winding. Over the domain `[0, 1]` the angle `u` runs from `0`
/// to `2π·p`, so the curve winds `p` times around the Z axis and `q·p` times
/// around the tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnot3 {
    pub radius: f64,
    pub tube: f64,
    pub p: i32,
    pub q: i32,
}

impl TorusKnot3 {
    #[must_use]
    pub const fn new(radius: f64, tube: f64, p: i32, q: i32) -> Self {
        Self { radius, tube, p, q }
    }

    /// Evaluates the knot directly at angle `u`.
    #[must_use]
    pub fn point_at_angle(&self, u: f64) -> Point3 {
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_qu, cos_qu) = (f64::from(self.q) * u).sin_cos();
        let ring = self.radius + self.tube * cos_qu;
        Point3::new(ring * cos_u, ring * sin_u, self.tube * sin_qu)
    }

    /// Angle `u` reached at the end of the domain.
    #[must_use]
    pub fn total_angle(&self) -> f64 {
        std::f64::consts::TAU * f64::from(self.p)
    }
}

impl Curve3 for TorusKnot3 {
    fn point_at(&self, t: f64) -> Point3 {
        let (t0, t1) = self.domain();
        let s = (t - t0) / (t1 - t0);
        self.point_at_angle(s * self.total_angle())
    }

    fn is_closed(&self) -> bool {
        true
    }
}
