// Math utilities for raster-demos
//
// Every builder returns a fresh column-major `Mat4`; `to_cols_array()` gives
// the 16 floats in the order a `mat4x4<f32>` uniform expects.

use glam::{Mat4, Vec2};

/// Rotation about the Z axis, angle in degrees.
pub fn rotate(angle_degrees: f32) -> Mat4 {
    let radians = angle_degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    #[rustfmt::skip]
    let cols = [
        cos,  sin, 0.0, 0.0,
        -sin, cos, 0.0, 0.0,
        0.0,  0.0, 1.0, 0.0,
        0.0,  0.0, 0.0, 1.0,
    ];
    Mat4::from_cols_array(&cols)
}

/// 2D translation; z translation is always 0.
pub fn translate(tx: f32, ty: f32) -> Mat4 {
    #[rustfmt::skip]
    let cols = [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        tx,  ty,  0.0, 1.0,
    ];
    Mat4::from_cols_array(&cols)
}

/// Non-uniform 2D scale; z scale is always 1.
pub fn scale(sx: f32, sy: f32) -> Mat4 {
    #[rustfmt::skip]
    let cols = [
        sx,  0.0, 0.0, 0.0,
        0.0, sy,  0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    Mat4::from_cols_array(&cols)
}

/// Maps the box `[l, r] x [b, t] x [n, f]` onto the clip cube `[-1, 1]^3`.
///
/// Each axis is remapped independently: `c' = 2c/(hi-lo) - (hi+lo)/(hi-lo)`,
/// so passing `t < b` flips that axis. The caller
/// must ensure `l != r`, `t != b` and `n != f`; otherwise the result holds
/// non-finite values (check with [`is_finite`]).
pub fn project(l: f32, r: f32, t: f32, b: f32, n: f32, f: f32) -> Mat4 {
    let width = r - l;
    let height = t - b;
    let depth = f - n;
    #[rustfmt::skip]
    let cols = [
        2.0 / width,       0.0,                0.0,               0.0,
        0.0,               2.0 / height,       0.0,               0.0,
        0.0,               0.0,                2.0 / depth,       0.0,
        -(r + l) / width,  -(t + b) / height,  -(f + n) / depth,  1.0,
    ];
    Mat4::from_cols_array(&cols)
}

/// Luminance-preserving hue rotation for RGB colors, angle in degrees.
///
/// Coefficients follow the `feColorMatrix` `hueRotate` equivalent from the
/// W3C filter effects draft (luminance weights 0.213, 0.715, 0.072). Alpha
/// passes through untouched.
pub fn hue_rotate(angle_degrees: f32) -> Mat4 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    #[rustfmt::skip]
    let cols = [
        0.213 + cos * 0.787 - sin * 0.213, 0.213 - cos * 0.213 + sin * 0.143, 0.213 - cos * 0.213 - sin * 0.787, 0.0,
        0.715 - cos * 0.715 - sin * 0.715, 0.715 + cos * 0.285 + sin * 0.140, 0.715 - cos * 0.715 + sin * 0.715, 0.0,
        0.072 - cos * 0.072 + sin * 0.928, 0.072 - cos * 0.072 - sin * 0.283, 0.072 + cos * 0.928 + sin * 0.072, 0.0,
        0.0,                               0.0,                               0.0,                               1.0,
    ];
    Mat4::from_cols_array(&cols)
}

/// True when every element is finite. A degenerate [`project`] fails this.
pub fn is_finite(matrix: &Mat4) -> bool {
    matrix.to_cols_array().iter().all(|v| v.is_finite())
}

/// A 2D placement: scale, then rotate about Z, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub translation: Vec2,
    pub angle_degrees: f32,
    pub scale: Vec2,
}

impl Transform2D {
    /// Create a new transform
    pub fn new(translation: Vec2, angle_degrees: f32, scale: Vec2) -> Self {
        Self {
            translation,
            angle_degrees,
            scale,
        }
    }

    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            translation: Vec2::ZERO,
            angle_degrees: 0.0,
            scale: Vec2::ONE,
        }
    }

    /// Generate the model matrix
    pub fn matrix(&self) -> Mat4 {
        translate(self.translation.x, self.translation.y)
            * rotate(self.angle_degrees)
            * scale(self.scale.x, self.scale.y)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec4;

    const EPSILON: f32 = 1e-5;

    fn assert_mat_eq(actual: Mat4, expected: Mat4) {
        let actual = actual.to_cols_array();
        let expected = expected.to_cols_array();
        for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            assert!(
                (a - e).abs() <= EPSILON,
                "element {i}: {a} != {e}\nactual:   {actual:?}\nexpected: {expected:?}"
            );
        }
    }

    fn assert_vec_eq(actual: Vec4, expected: Vec4) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.z, expected.z, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.w, expected.w, epsilon = EPSILON);
    }

    #[test]
    fn identity_layout() {
        let cols = Mat4::IDENTITY.to_cols_array();
        assert_eq!(cols.len(), 16);
        for (i, v) in cols.iter().enumerate() {
            let expected = if matches!(i, 0 | 5 | 10 | 15) { 1.0 } else { 0.0 };
            assert_eq!(*v, expected);
        }
    }

    #[test]
    fn rotate_zero_is_identity() {
        assert_mat_eq(rotate(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn rotate_full_turn_matches_zero() {
        assert_mat_eq(rotate(360.0), rotate(0.0));
    }

    #[test]
    fn rotate_then_inverse_is_identity() {
        for angle in [12.5, 78.0, 135.0, -200.0] {
            assert_mat_eq(rotate(angle) * rotate(-angle), Mat4::IDENTITY);
        }
    }

    #[test]
    fn rotate_quarter_turn_maps_x_to_y() {
        let p = rotate(90.0) * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_vec_eq(p, Vec4::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn rotate_keeps_z_and_w() {
        let p = rotate(33.0) * Vec4::new(0.0, 0.0, 4.0, 1.0);
        assert_vec_eq(p, Vec4::new(0.0, 0.0, 4.0, 1.0));
    }

    #[test]
    fn translate_zero_is_identity() {
        assert_mat_eq(translate(0.0, 0.0), Mat4::IDENTITY);
    }

    #[test]
    fn translate_places_offsets_in_last_column() {
        let cols = translate(3.0, -2.0).to_cols_array();
        assert_eq!(cols[12], 3.0);
        assert_eq!(cols[13], -2.0);
        assert_eq!(cols[14], 0.0);
        for (i, v) in cols.iter().enumerate() {
            match i {
                0 | 5 | 10 | 15 => assert_eq!(*v, 1.0),
                12 | 13 => {}
                _ => assert_eq!(*v, 0.0, "element {i}"),
            }
        }

        let p = translate(3.0, -2.0) * Vec4::new(1.0, 1.0, 0.0, 1.0);
        assert_vec_eq(p, Vec4::new(4.0, -1.0, 0.0, 1.0));
    }

    #[test]
    fn scale_one_is_identity() {
        assert_mat_eq(scale(1.0, 1.0), Mat4::IDENTITY);
    }

    #[test]
    fn scale_is_per_axis() {
        let p = scale(2.0, 0.5) * Vec4::new(3.0, 4.0, 5.0, 1.0);
        assert_vec_eq(p, Vec4::new(6.0, 2.0, 5.0, 1.0));
    }

    #[test]
    fn project_unit_box_is_identity() {
        assert_mat_eq(project(-1.0, 1.0, 1.0, -1.0, -1.0, 1.0), Mat4::IDENTITY);
    }

    #[test]
    fn project_swapped_top_bottom_flips_y() {
        let m = project(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        assert_mat_eq(m, scale(1.0, -1.0));
        assert_vec_eq(m * Vec4::new(0.25, 0.75, 0.5, 1.0), Vec4::new(0.25, -0.75, 0.5, 1.0));
    }

    #[test]
    fn project_maps_box_corners_to_clip_cube() {
        let m = project(0.0, 800.0, 600.0, 0.0, 0.0, 10.0);
        assert_vec_eq(m * Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(-1.0, -1.0, -1.0, 1.0));
        assert_vec_eq(m * Vec4::new(800.0, 600.0, 10.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_vec_eq(m * Vec4::new(400.0, 300.0, 5.0, 1.0), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert!(is_finite(&m));
    }

    #[test]
    fn project_degenerate_box_is_not_finite() {
        assert!(!is_finite(&project(1.0, 1.0, 1.0, -1.0, -1.0, 1.0)));
        assert!(!is_finite(&project(-1.0, 1.0, 2.0, 2.0, -1.0, 1.0)));
        assert!(!is_finite(&project(-1.0, 1.0, 1.0, -1.0, 3.0, 3.0)));
    }

    #[test]
    fn project_remaps_each_axis_linearly() {
        let m = project(0.0, 800.0, 1.0, -1.0, -1.0, 1.0);
        for x in [0.0, 250.0, 400.0, 800.0] {
            let p = m * Vec4::new(x, 0.0, 0.0, 1.0);
            assert_abs_diff_eq!(p.x, x / 400.0 - 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn project_window_box_flips_y() {
        // top = 0, bottom = height: window pixels, y down
        let m = project(0.0, 800.0, 0.0, 600.0, -1.0, 1.0);
        assert_vec_eq(m * Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(-1.0, 1.0, 0.0, 1.0));
        assert_vec_eq(m * Vec4::new(800.0, 600.0, 0.0, 1.0), Vec4::new(1.0, -1.0, 0.0, 1.0));
    }

    #[test]
    fn hue_rotate_zero_is_identity() {
        assert_mat_eq(hue_rotate(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn hue_rotate_full_turn_matches_zero() {
        assert_mat_eq(hue_rotate(360.0), hue_rotate(0.0));
    }

    #[test]
    fn hue_rotate_keeps_greys_and_alpha() {
        for angle in [45.0, 90.0, 180.0, 270.0] {
            let grey = hue_rotate(angle) * Vec4::new(0.5, 0.5, 0.5, 0.25);
            assert_abs_diff_eq!(grey.x, 0.5, epsilon = 1e-3);
            assert_abs_diff_eq!(grey.y, 0.5, epsilon = 1e-3);
            assert_abs_diff_eq!(grey.z, 0.5, epsilon = 1e-3);
            assert_abs_diff_eq!(grey.w, 0.25, epsilon = EPSILON);
        }
    }

    #[test]
    fn hue_rotate_half_turn_moves_red() {
        let shifted = hue_rotate(180.0) * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(shifted.x < 0.0);
        assert!(shifted.y > 0.0);
        assert!(shifted.z > 0.0);
    }

    #[test]
    fn transform_scales_then_rotates_then_translates() {
        let transform = Transform2D::new(Vec2::new(0.5, 0.0), 90.0, Vec2::new(2.0, 1.0));
        let p = transform.matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_vec_eq(p, Vec4::new(0.5, 2.0, 0.0, 1.0));
    }

    #[test]
    fn transform_identity_and_angle() {
        assert_mat_eq(Transform2D::default().matrix(), Mat4::IDENTITY);
        assert_mat_eq(
            Transform2D::new(Vec2::ZERO, 30.0, Vec2::ONE).matrix(),
            rotate(30.0),
        );
    }

    #[test]
    fn rotate_before_translate_differs_from_translate_before_rotate() {
        let p = Vec4::new(0.0, 0.5, 0.0, 1.0);
        let a = rotate(90.0) * translate(0.5, 0.0) * p;
        let b = translate(0.5, 0.0) * rotate(90.0) * p;
        assert_vec_eq(a, Vec4::new(-0.5, 0.5, 0.0, 1.0));
        assert_vec_eq(b, Vec4::new(0.0, 0.0, 0.0, 1.0));
    }
}
