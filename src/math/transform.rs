//! 变换与矩阵构建
//!
//! 构建函数返回 glam 的 `Mat4`，语义按行向量约定描述（见模块 [`crate::math`] 文档）。

use glam::{Mat3, Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// 变换（缩放、欧拉角旋转、平移）
///
/// 由持有它的对象（相机、粒子、发射器）直接修改，没有独立的生命周期。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// 缩放
    pub scale: Vec3,
    /// 欧拉角旋转（弧度，XYZ 顺序）
    pub rotate: Vec3,
    /// 平移
    pub translate: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotate: Vec3::ZERO,
            translate: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn new(scale: Vec3, rotate: Vec3, translate: Vec3) -> Self {
        Self {
            scale,
            rotate,
            translate,
        }
    }

    /// 仅包含平移的变换
    pub fn from_translation(translate: Vec3) -> Self {
        Self {
            translate,
            ..Default::default()
        }
    }

    /// 世界矩阵：`Scale * RotateX * RotateY * RotateZ * Translate`
    pub fn matrix(&self) -> Mat4 {
        make_affine_matrix(self.scale, self.rotate, self.translate)
    }
}

/// 按行向量约定计算 `m1 * m2`（先应用 `m1`，再应用 `m2`）
#[inline]
pub fn multiply(m1: &Mat4, m2: &Mat4) -> Mat4 {
    *m2 * *m1
}

/// 缩放矩阵
pub fn make_scale_matrix(scale: Vec3) -> Mat4 {
    Mat4::from_scale(scale)
}

/// X 轴旋转矩阵
pub fn make_rotate_x_matrix(radian: f32) -> Mat4 {
    Mat4::from_rotation_x(radian)
}

/// Y 轴旋转矩阵
pub fn make_rotate_y_matrix(radian: f32) -> Mat4 {
    Mat4::from_rotation_y(radian)
}

/// Z 轴旋转矩阵
pub fn make_rotate_z_matrix(radian: f32) -> Mat4 {
    Mat4::from_rotation_z(radian)
}

/// 组合旋转矩阵：`RotateX * RotateY * RotateZ`
pub fn make_rotation_matrix(rotate: Vec3) -> Mat4 {
    multiply(
        &make_rotate_x_matrix(rotate.x),
        &multiply(&make_rotate_y_matrix(rotate.y), &make_rotate_z_matrix(rotate.z)),
    )
}

/// 平移矩阵
pub fn make_translate_matrix(translate: Vec3) -> Mat4 {
    Mat4::from_translation(translate)
}

/// 三维仿射变换矩阵
///
/// 组合顺序固定为 `Scale * RotateX * RotateY * RotateZ * Translate`，不支持其他轴顺序。
pub fn make_affine_matrix(scale: Vec3, rotate: Vec3, translate: Vec3) -> Mat4 {
    multiply(
        &make_scale_matrix(scale),
        &multiply(&make_rotation_matrix(rotate), &make_translate_matrix(translate)),
    )
}

/// 透视投影矩阵（左手系，深度范围 0..1）
pub fn make_perspective_fov_matrix(fov_y: f32, aspect_ratio: f32, near_clip: f32, far_clip: f32) -> Mat4 {
    Mat4::perspective_lh(fov_y, aspect_ratio, near_clip, far_clip)
}

/// 正交投影矩阵（左手系，深度范围 0..1）
pub fn make_orthographic_matrix(
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    near_clip: f32,
    far_clip: f32,
) -> Mat4 {
    Mat4::orthographic_lh(left, right, bottom, top, near_clip, far_clip)
}

/// 视口变换矩阵（NDC → 屏幕坐标，Y 轴向下）
pub fn make_viewport_matrix(
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    min_depth: f32,
    max_depth: f32,
) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(width / 2.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -height / 2.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, max_depth - min_depth, 0.0),
        Vec4::new(left + width / 2.0, top + height / 2.0, min_depth, 1.0),
    )
}

/// 提取矩阵的上 3×3 旋转块，平移清零
pub fn rotation_block(matrix: &Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(*matrix))
}

/// 方向旋转矩阵：列向量约定下的 `Rx * Ry * Rz`
///
/// 与 [`make_rotation_matrix`] 不同，作用在列向量上，即先绕 Z、再绕 Y、最后绕 X。
/// 只在两个以上的轴同时旋转时两者结果不同。
pub fn make_direction_rotation_matrix(rotate: Vec3) -> Mat3 {
    Mat3::from_rotation_x(rotate.x) * Mat3::from_rotation_y(rotate.y) * Mat3::from_rotation_z(rotate.z)
}

/// 把局部方向向量按变换的旋转转到世界空间（不含缩放和平移）
pub fn transform_direction(transform: &Transform, local_direction: Vec3) -> Vec3 {
    make_direction_rotation_matrix(transform.rotate) * local_direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_affine_applies_scale_then_translate() {
        let m = make_affine_matrix(Vec3::splat(2.0), Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn test_affine_matches_row_vector_composition() {
        let scale = Vec3::new(1.0, 2.0, 0.5);
        let rotate = Vec3::new(0.3, -1.2, 2.0);
        let translate = Vec3::new(-4.0, 5.0, 6.0);

        let expected = multiply(
            &make_scale_matrix(scale),
            &multiply(
                &multiply(
                    &make_rotate_x_matrix(rotate.x),
                    &multiply(&make_rotate_y_matrix(rotate.y), &make_rotate_z_matrix(rotate.z)),
                ),
                &make_translate_matrix(translate),
            ),
        );
        let actual = make_affine_matrix(scale, rotate, translate);
        assert!(actual.abs_diff_eq(expected, 1e-5));

        // 行向量约定下平移位于第四行，对应 glam 的 w_axis
        assert!(actual.w_axis.truncate().abs_diff_eq(translate, 1e-6));
    }

    #[test]
    fn test_rotation_order_x_before_z() {
        // 先绕 X 转 90°，再绕 Z 转 90°：+Y → +Z → +Z
        let m = make_rotation_matrix(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        let v = m.transform_vector3(Vec3::Y);
        assert!(v.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_perspective_layout() {
        let fov = 0.45f32;
        let aspect = 1280.0 / 720.0;
        let m = make_perspective_fov_matrix(fov, aspect, 0.1, 100.0);
        let expected_x = 1.0 / aspect / (fov / 2.0).tan();
        assert!((m.x_axis.x - expected_x).abs() < 1e-5);
        assert!((m.z_axis.w - 1.0).abs() < 1e-6);
        let expected_wz = -100.0 * 0.1 / (100.0 - 0.1);
        assert!((m.w_axis.z - expected_wz).abs() < 1e-5);
    }

    #[test]
    fn test_orthographic_maps_corners() {
        let m = make_orthographic_matrix(0.0, 0.0, 1280.0, 720.0, 0.0, 100.0);
        let top_left = m.transform_point3(Vec3::new(0.0, 0.0, 0.0));
        let bottom_right = m.transform_point3(Vec3::new(1280.0, 720.0, 100.0));
        assert!(top_left.abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0), 1e-5));
        assert!(bottom_right.abs_diff_eq(Vec3::new(1.0, -1.0, 1.0), 1e-5));
    }

    #[test]
    fn test_viewport_maps_ndc_to_screen() {
        let m = make_viewport_matrix(10.0, 20.0, 1280.0, 720.0, 0.0, 1.0);
        let p = m.transform_point3(Vec3::new(1.0, 1.0, 0.5));
        assert!(p.abs_diff_eq(Vec3::new(1290.0, 20.0, 0.5), 1e-4));
    }

    #[test]
    fn test_rotation_block_drops_translation() {
        let m = make_affine_matrix(Vec3::ONE, Vec3::new(0.0, 0.7, 0.0), Vec3::new(9.0, 8.0, 7.0));
        let block = rotation_block(&m);
        assert_eq!(block.w_axis, Vec4::W);
        assert!(block.x_axis.abs_diff_eq(m.x_axis, 1e-6));
    }

    #[test]
    fn test_transform_direction() {
        let transform = Transform::new(Vec3::splat(3.0), Vec3::new(0.0, FRAC_PI_2, 0.0), Vec3::splat(5.0));
        let dir = transform_direction(&transform, Vec3::Z);
        assert!(dir.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_transform_direction_multi_axis() {
        let (x, y, z) = (0.7f32, 0.5f32, 0.3f32);
        let transform = Transform::new(Vec3::ONE, Vec3::new(x, y, z), Vec3::ZERO);

        // +Z 取旋转矩阵的第三列
        let dir = transform_direction(&transform, Vec3::Z);
        let expected = Vec3::new(y.sin(), -y.cos() * x.sin(), x.cos() * y.cos());
        assert!(dir.abs_diff_eq(expected, 1e-6));
        assert!(dir.abs_diff_eq(Vec3::new(0.4794, -0.5654, 0.6712), 1e-4));

        // 第一行：(cosY cosZ, -cosY sinZ, sinY)
        let m = make_direction_rotation_matrix(transform.rotate);
        let row0 = m.row(0);
        assert!(row0.abs_diff_eq(Vec3::new(y.cos() * z.cos(), -y.cos() * z.sin(), y.sin()), 1e-6));

        // 世界矩阵的旋转按行向量约定组合，多轴时方向不同
        let world_dir = make_rotation_matrix(transform.rotate).transform_vector3(Vec3::Z);
        assert!(!world_dir.abs_diff_eq(dir, 1e-3));
    }

    #[test]
    fn test_view_is_inverse_of_world() {
        let camera = Transform::new(Vec3::ONE, Vec3::new(0.2, 0.1, 0.0), Vec3::new(0.0, 0.0, -10.0));
        let world = camera.matrix();
        let view = world.inverse();
        assert!(multiply(&world, &view).abs_diff_eq(Mat4::IDENTITY, 1e-5));
        assert!(world.transpose().transpose().abs_diff_eq(world, 0.0));
    }
}
