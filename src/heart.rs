// Parametric heart curve and the sampling that fills its interior.
// Points are area-uniform: the cube root of a uniform draw is used as the
// radial factor, the same trick as uniform disk sampling.

use rand::Rng;
use std::f64::consts::PI;
use vecmath::Vector3;

/// Overall scale applied to every sampled target.
pub const HEART_SIZE: f64 = 16.0;

/// Half-depth of the extrusion, in curve units before scaling.
pub const DEPTH: f64 = 5.0;

/// Closed-form 2D heart curve at parameter `t`, before any scaling.
/// Y is negated so the heart points down-up in canvas coordinates.
pub fn curve(t: f64) -> (f64, f64) {
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
    (x, y)
}

/// One sampled target point. The curve parameter and radial scale that
/// produced it are kept so the target can be re-derived from the closed
/// form.
#[derive(Copy, Clone, Debug)]
pub struct HeartSample {
    pub t: f64,
    pub scale: f64,
    pub target: Vector3<f64>,
}

impl HeartSample {
    pub fn random<R: Rng>(rng: &mut R) -> HeartSample {
        HeartSample::random_scaled(rng, HEART_SIZE)
    }

    pub fn random_scaled<R: Rng>(rng: &mut R, size: f64) -> HeartSample {
        let t = rng.gen::<f64>() * PI * 2.0;
        let u = rng.gen::<f64>();
        let scale = u.cbrt() * size;
        let (x, y) = curve(t);
        let z = (rng.gen::<f64>() - 0.5) * (DEPTH * 2.0);
        HeartSample {
            t,
            scale,
            target: [x * scale, y * scale, z * scale],
        }
    }
}
