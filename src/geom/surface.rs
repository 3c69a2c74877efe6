use std::f64::consts::TAU;

use super::core::{Point3, Tolerance, Vec3};

pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;

    #[must_use]
    fn domain_u(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn domain_v(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn is_u_closed(&self) -> bool {
        false
    }

    #[must_use]
    fn is_v_closed(&self) -> bool {
        false
    }

    /// First partial derivatives `(dP/du, dP/dv)`.
    ///
    /// The default uses one-sided differences clamped to the domain, stepped by
    /// [`Tolerance::DERIVATIVE`] relative to the domain span.
    #[must_use]
    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3) {
        let (u0, u1) = self.domain_u();
        let (v0, v1) = self.domain_v();

        let u = u.clamp(u0.min(u1), u0.max(u1));
        let v = v.clamp(v0.min(v1), v0.max(v1));

        let du = difference_along(u, u0, u1, |t| self.point_at(t, v));
        let dv = difference_along(v, v0, v1, |t| self.point_at(u, t));
        (du, dv)
    }

    #[must_use]
    fn normal_at(&self, u: f64, v: f64) -> Option<Vec3> {
        let (du, dv) = self.partial_derivatives_at(u, v);
        du.cross(dv).normalized()
    }

    /// Area element `|dP/du x dP/dv|` at a parametric point.
    #[must_use]
    fn area_element_at(&self, u: f64, v: f64) -> f64 {
        let (du, dv) = self.partial_derivatives_at(u, v);
        du.cross(dv).length()
    }
}

fn difference_along(t: f64, t0: f64, t1: f64, eval: impl Fn(f64) -> Point3) -> Vec3 {
    let span = t1 - t0;
    if !span.is_finite() || span == 0.0 {
        return Vec3::ZERO;
    }
    let h = Tolerance::DERIVATIVE.relative_to(span);
    if !h.is_finite() || h == 0.0 {
        return Vec3::ZERO;
    }

    let (lo, hi) = (t0.min(t1), t0.max(t1));
    let ta = (t - h).max(lo);
    let tb = (t + h).min(hi);
    if ta == tb {
        return Vec3::ZERO;
    }
    eval(tb).sub_point(eval(ta)).mul_scalar(1.0 / (tb - ta))
}

/// The Möbius strip around the Z axis.
///
/// `u` runs once around the centerline over `[0, 2π]`, `v` is the lateral
/// offset over `[-width/2, width/2]`. The half-angle terms rotate the ruling
/// by π over one loop, so `point_at(u + 2π, v) == point_at(u, -v)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobiusSurface {
    pub central_radius: f64,
    pub width: f64,
}

impl MobiusSurface {
    #[must_use]
    pub const fn new(central_radius: f64, width: f64) -> Self {
        Self {
            central_radius,
            width,
        }
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    /// Parameters of the same physical point one loop further along the centerline.
    #[must_use]
    pub fn twisted_partner(&self, u: f64, v: f64) -> (f64, f64) {
        (u + TAU, -v)
    }
}

impl Surface for MobiusSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let radius_offset = self.central_radius + v * (u / 2.0).cos();
        Point3::new(
            radius_offset * u.cos(),
            radius_offset * u.sin(),
            v * (u / 2.0).sin(),
        )
    }

    fn domain_u(&self) -> (f64, f64) {
        (0.0, TAU)
    }

    fn domain_v(&self) -> (f64, f64) {
        let half = self.half_width();
        (-half, half)
    }

    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3) {
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_half, cos_half) = (u / 2.0).sin_cos();
        let radius_offset = self.central_radius + v * cos_half;

        let du = Vec3::new(
            -sin_u * radius_offset - 0.5 * v * sin_half * cos_u,
            cos_u * radius_offset - 0.5 * v * sin_half * sin_u,
            0.5 * v * cos_half,
        );
        let dv = Vec3::new(cos_half * cos_u, cos_half * sin_u, sin_half);
        (du, dv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centerline_is_a_circle_of_central_radius() {
        let strip = MobiusSurface::new(2.0, 0.5);
        for k in 0..8 {
            let u = TAU * f64::from(k) / 8.0;
            let p = strip.point_at(u, 0.0);
            assert!((p.x.hypot(p.y) - 2.0).abs() < 1e-12);
            assert!(p.z.abs() < 1e-12);
        }
    }

    #[test]
    fn one_loop_flips_the_lateral_offset() {
        let strip = MobiusSurface::new(1.0, 0.4);
        let tol = Tolerance::new(1e-12);
        for &(u, v) in &[(0.0, 0.2), (1.3, -0.1), (4.0, 0.05)] {
            let (pu, pv) = strip.twisted_partner(u, v);
            assert!(tol.approx_eq_point3(strip.point_at(u, v), strip.point_at(pu, pv)));
        }
    }

    #[test]
    fn default_partials_fall_back_to_zero_on_empty_domain() {
        let strip = MobiusSurface::new(1.0, 0.0);
        let p = strip.point_at(0.3, 0.0);
        let dv = difference_along(0.0, 0.0, 0.0, |t| strip.point_at(0.3, t));
        assert_eq!(dv, Vec3::ZERO);
        assert!(p.is_finite());
    }
}
