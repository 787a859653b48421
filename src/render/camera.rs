//! 相机
//!
//! 由相机变换计算视图、投影与视图投影矩阵，并提供广告牌旋转。
//! 相机世界矩阵 = `affine(transform)`，视图矩阵 = 世界矩阵的逆。

use crate::math::{make_perspective_fov_matrix, multiply, rotation_block, Transform};
use bevy_ecs::prelude::*;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// 透视相机
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// 相机变换
    pub transform: Transform,
    /// 垂直视野（弧度）
    pub fov_y: f32,
    /// 宽高比
    pub aspect_ratio: f32,
    /// 近裁剪面
    pub near_clip: f32,
    /// 远裁剪面
    pub far_clip: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::from_translation(Vec3::new(0.0, 0.0, -10.0)),
            fov_y: 0.45,
            aspect_ratio: 1280.0 / 720.0,
            near_clip: 0.1,
            far_clip: 100.0,
        }
    }
}

impl Camera {
    /// 相机世界矩阵
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    /// 视图矩阵
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    /// 投影矩阵
    pub fn projection_matrix(&self) -> Mat4 {
        make_perspective_fov_matrix(self.fov_y, self.aspect_ratio, self.near_clip, self.far_clip)
    }

    /// 视图投影矩阵：`View * Projection`（行向量约定）
    pub fn view_projection_matrix(&self) -> Mat4 {
        multiply(&self.view_matrix(), &self.projection_matrix())
    }

    /// 广告牌旋转：相机世界矩阵的上 3×3 块
    pub fn billboard_matrix(&self) -> Mat4 {
        rotation_block(&self.world_matrix())
    }

    /// 模拟步骤需要的相机快照
    pub fn view(&self) -> CameraView {
        CameraView {
            view_projection: self.view_projection_matrix(),
            billboard: self.billboard_matrix(),
        }
    }
}

/// 每帧传入模拟步骤的相机数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// 视图投影矩阵
    pub view_projection: Mat4,
    /// 广告牌旋转（无平移）
    pub billboard: Mat4,
}

impl CameraView {
    /// 单位相机：视图投影与广告牌均为单位矩阵
    pub const IDENTITY: Self = Self {
        view_projection: Mat4::IDENTITY,
        billboard: Mat4::IDENTITY,
    };

    pub fn new(view_projection: Mat4, billboard: Mat4) -> Self {
        Self {
            view_projection,
            billboard,
        }
    }
}

impl Default for CameraView {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 主相机资源
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct MainCamera(pub Camera);

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_point_in_front_projects_inside_clip() {
        let camera = Camera::default();
        let vp = camera.view_projection_matrix();
        let clip = vp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn test_billboard_has_no_translation() {
        let mut camera = Camera::default();
        camera.transform.rotate = Vec3::new(0.3, 0.5, 0.0);
        let billboard = camera.billboard_matrix();
        assert_eq!(billboard.w_axis, Vec4::W);
        let world = camera.world_matrix();
        assert!(billboard.x_axis.truncate().abs_diff_eq(world.x_axis.truncate(), 1e-6));
    }

    #[test]
    fn test_identity_view() {
        let view = CameraView::default();
        assert_eq!(view.view_projection, Mat4::IDENTITY);
        assert_eq!(view.billboard, Mat4::IDENTITY);
    }
}
