//! 粒子记录

use crate::math::Transform;
use glam::{Vec3, Vec4};

/// 单个粒子的状态
///
/// `life_time` 在生成时确定；`current_time` 从 0 开始逐帧累加，
/// 当 `current_time >= life_time` 时粒子在下一次更新的第一步被移除。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// 变换
    pub transform: Transform,
    /// 速度（单位/秒）
    pub velocity: Vec3,
    /// 颜色（RGBA，0..1）
    pub color: Vec4,
    /// 生命周期（秒）
    pub life_time: f32,
    /// 已存活时间（秒）
    pub current_time: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            velocity: Vec3::ZERO,
            color: Vec4::ONE,
            life_time: 1.0,
            current_time: 0.0,
        }
    }
}

impl Particle {
    pub fn new(translate: Vec3, velocity: Vec3, color: Vec4, life_time: f32) -> Self {
        Self {
            transform: Transform::from_translation(translate),
            velocity,
            color,
            life_time,
            current_time: 0.0,
        }
    }

    /// 是否已到期
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.current_time >= self.life_time
    }

    /// 线性淡出的 alpha：`1 - current_time / life_time`
    #[inline]
    pub fn fade_alpha(&self) -> f32 {
        1.0 - self.current_time / self.life_time
    }

    /// 积分一步运动并累加年龄
    #[inline]
    pub fn integrate(&mut self, delta_time: f32) {
        self.transform.translate += self.velocity * delta_time;
        self.current_time += delta_time;
    }
}
