//! Four-point spline factories
//!
//! A [`SplineFactory`] turns four 4-channel control vectors into a function
//! of `t` in `[0, 1]`. Each channel is interpolated independently, so the
//! same factory serves position, rotation and zoom deltas at once.

use glam::Vec4;

/// A sampled 4-channel curve
pub type Vec4Spline = Box<dyn Fn(f32) -> Vec4 + Send + Sync>;

/// Builds a curve from four control vectors
pub trait SplineFactory {
    /// Create a curve; how `controls` are read depends on the factory
    fn create(&self, controls: [Vec4; 4]) -> Vec4Spline;
}

/// Cubic Bézier through `controls[0]` and `controls[3]`, shaped by the middle two
#[derive(Clone, Copy, Debug, Default)]
pub struct BezierSplineFactory;

impl SplineFactory for BezierSplineFactory {
    fn create(&self, controls: [Vec4; 4]) -> Vec4Spline {
        let [p0, p1, p2, p3] = controls;
        Box::new(move |t| {
            let t = t.clamp(0.0, 1.0);
            let u = 1.0 - t;
            p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
        })
    }
}

/// Cubic Hermite curve from `[start, start_tangent, end_tangent, end]`
#[derive(Clone, Copy, Debug, Default)]
pub struct HermiteSplineFactory;

impl SplineFactory for HermiteSplineFactory {
    fn create(&self, controls: [Vec4; 4]) -> Vec4Spline {
        let [p0, m0, m1, p1] = controls;
        Box::new(move |t| {
            let t = t.clamp(0.0, 1.0);
            let t2 = t * t;
            let t3 = t2 * t;
            p0 * (2.0 * t3 - 3.0 * t2 + 1.0)
                + m0 * (t3 - 2.0 * t2 + t)
                + p1 * (-2.0 * t3 + 3.0 * t2)
                + m1 * (t3 - t2)
        })
    }
}

/// Catmull-Rom segment between `controls[1]` and `controls[2]`
///
/// The outer points only shape the tangents.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatmullRomSplineFactory;

impl SplineFactory for CatmullRomSplineFactory {
    fn create(&self, controls: [Vec4; 4]) -> Vec4Spline {
        let [p0, p1, p2, p3] = controls;
        Box::new(move |t| {
            let t = t.clamp(0.0, 1.0);
            let t2 = t * t;
            let t3 = t2 * t;
            0.5 * ((2.0 * p1)
                + (-p0 + p2) * t
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).length() < 1e-5
    }

    fn controls() -> [Vec4; 4] {
        [
            Vec4::new(0.0, 0.0, 0.0, 0.0),
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(-1.0, 0.5, 2.0, 0.0),
            Vec4::new(2.0, 2.0, 2.0, 2.0),
        ]
    }

    #[test]
    fn test_bezier_hits_endpoints() {
        let spline = BezierSplineFactory.create(controls());
        assert!(approx(spline(0.0), controls()[0]));
        assert!(approx(spline(1.0), controls()[3]));
    }

    #[test]
    fn test_hermite_hits_endpoints() {
        let spline = HermiteSplineFactory.create(controls());
        assert!(approx(spline(0.0), controls()[0]));
        assert!(approx(spline(1.0), controls()[3]));
    }

    #[test]
    fn test_catmull_rom_passes_inner_points() {
        let spline = CatmullRomSplineFactory.create(controls());
        assert!(approx(spline(0.0), controls()[1]));
        assert!(approx(spline(1.0), controls()[2]));
    }

    #[test]
    fn test_samples_outside_range_are_clamped() {
        let spline = BezierSplineFactory.create(controls());
        assert!(approx(spline(-1.0), spline(0.0)));
        assert!(approx(spline(2.0), spline(1.0)));
    }
}
