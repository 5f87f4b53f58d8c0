// 3D to 2D: two sequential axis rotations followed by a perspective
// divide. The rotations are written out longhand because the order matters:
// X first with the vertical tilt, then Y with the spin, on the result.

use vecmath::Vector3;

pub const PERSPECTIVE: f64 = 500.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// Rotate `pos` about X then Y and project onto the canvas around
/// `center`. Returns `None` for points behind the camera, which would
/// otherwise flip and smear across the screen.
pub fn project(pos: Vector3<f64>, rot_x: f64, rot_y: f64, center: (f64, f64)) -> Option<Projected> {
    let [x, y, z] = pos;

    let y1 = y * rot_x.cos() - z * rot_x.sin();
    let z1 = z * rot_x.cos() + y * rot_x.sin();

    let x1 = x * rot_y.cos() - z1 * rot_y.sin();
    let z2 = z1 * rot_y.cos() + x * rot_y.sin();

    let scale = PERSPECTIVE / (PERSPECTIVE + z2);
    if scale < 0.0 || z2 < -PERSPECTIVE {
        return None;
    }

    Some(Projected {
        x: center.0 + x1 * scale,
        y: center.1 + y1 * scale,
        scale,
    })
}
