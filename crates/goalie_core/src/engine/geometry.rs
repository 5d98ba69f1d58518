//! Geometry helpers
//!
//! Angles are in degrees, normalized to (-180, 180], measured from the +X axis.

use nalgebra::Vector2;

/// 2D point / vector in field coordinates
pub type Vec2 = Vector2<f32>;

const EPS: f32 = 1e-6;

/// Normalize an angle in degrees into (-180, 180]
pub fn normalize_angle(deg: f32) -> f32 {
    let mut a = deg % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Direction of a vector in degrees (0 for the zero vector)
pub fn direction_deg(v: Vec2) -> f32 {
    if v.norm_squared() < EPS * EPS {
        0.0
    } else {
        v.y.atan2(v.x).to_degrees()
    }
}

/// Absolute difference between two directions, in [0, 180]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Position after `n` steps of decaying motion.
///
/// Each step moves by the current velocity and then multiplies it by `decay`.
pub fn inertia_n_step_point(pos: Vec2, vel: Vec2, n: u32, decay: f32) -> Vec2 {
    if n == 0 {
        return pos;
    }
    let factor = if (1.0 - decay).abs() < EPS {
        n as f32
    } else {
        let n = n.min(i32::MAX as u32) as i32;
        (1.0 - decay.powi(n)) / (1.0 - decay)
    };
    pos + vel * factor
}

/// Position reached once residual velocity has fully decayed
pub fn inertia_final_point(pos: Vec2, vel: Vec2, decay: f32) -> Vec2 {
    if decay >= 1.0 - EPS {
        return pos;
    }
    pos + vel / (1.0 - decay)
}

/// Y of the line through `a` and `b` at the given X.
///
/// A vertical line has no single Y; `a.y` is returned in that case.
pub fn line_y_at(a: Vec2, b: Vec2, x: f32) -> f32 {
    let dx = b.x - a.x;
    if dx.abs() < EPS {
        return a.y;
    }
    a.y + (b.y - a.y) * (x - a.x) / dx
}
