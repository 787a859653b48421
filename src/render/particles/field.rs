//! 加速度场 / 风区
//!
//! 轴对齐包围盒与一个加速度向量。模拟过程中只读；粒子位于多个重叠区域内时，
//! 各区域的加速度独立叠加（不取平均）。

use crate::core::error::{ParticleError, ParticleResult};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// 创建包围盒，要求 `min <= max`（逐分量）
    pub fn new(min: Vec3, max: Vec3) -> ParticleResult<Self> {
        let aabb = Self { min, max };
        aabb.validate()?;
        Ok(aabb)
    }

    /// 以中心和半尺寸创建
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> ParticleResult<Self> {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn validate(&self) -> ParticleResult<()> {
        if self.min.cmple(self.max).all() {
            Ok(())
        } else {
            Err(ParticleError::InvalidBounds {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// 点是否在包围盒内，六个边界均为闭区间
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// 加速度场
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelerationField {
    /// 作用区域
    pub area: Aabb,
    /// 加速度
    pub acceleration: Vec3,
}

impl AccelerationField {
    pub fn new(area: Aabb, acceleration: Vec3) -> Self {
        Self { area, acceleration }
    }

    /// 点是否处于作用区域内
    #[inline]
    pub fn is_collision(&self, point: Vec3) -> bool {
        self.area.contains(point)
    }
}

/// 所有包含 `point` 的场的加速度之和
pub fn accumulated_acceleration(fields: &[AccelerationField], point: Vec3) -> Vec3 {
    fields
        .iter()
        .filter(|field| field.is_collision(point))
        .fold(Vec3::ZERO, |sum, field| sum + field.acceleration)
}
