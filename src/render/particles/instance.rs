//! 实例数据打包
//!
//! 把粒子的逻辑状态映射为固定容量的 GPU 实例记录数组。
//! 每帧从 0 号槽开始重新写入；超过容量的粒子静默丢弃（不报错、不记录日志）。
//! 写入计数之后的槽位保留上一帧的旧数据，但绘制调用只使用前 `count` 个。

use crate::core::error::{ParticleError, ParticleResult};
use glam::{Mat4, Vec4};

/// 默认最大实例数
pub const DEFAULT_MAX_INSTANCES: u32 = 1024;

/// GPU 实例记录（对应着色器中的实例结构）
///
/// 矩阵以 glam 的列主序写出，即行向量约定下的行主序布局。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// 世界-视图-投影矩阵
    pub wvp: [[f32; 4]; 4],
    /// 世界矩阵
    pub world: [[f32; 4]; 4],
    /// 颜色
    pub color: [f32; 4],
}

impl Default for ParticleInstance {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ONE)
    }
}

impl ParticleInstance {
    pub fn new(wvp: Mat4, world: Mat4, color: Vec4) -> Self {
        Self {
            wvp: wvp.to_cols_array_2d(),
            world: world.to_cols_array_2d(),
            color: color.to_array(),
        }
    }

    pub fn wvp_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.wvp)
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.world)
    }

    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }
}

/// 固定容量的实例缓冲区（CPU 端）
#[derive(Debug, Clone)]
pub struct ParticleInstanceBuffer {
    /// 全部槽位，长度恒为容量
    slots: Vec<ParticleInstance>,
    /// 本帧已写入数量
    count: u32,
}

impl ParticleInstanceBuffer {
    /// 创建缓冲区，容量必须大于 0
    pub fn new(capacity: u32) -> ParticleResult<Self> {
        if capacity == 0 {
            return Err(ParticleError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![ParticleInstance::default(); capacity as usize],
            count: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// 本帧已写入的实例数
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count as usize >= self.slots.len()
    }

    /// 开始新的一帧：计数归零，槽位内容保留
    pub fn begin_frame(&mut self) {
        self.count = 0;
    }

    /// 写入下一个空槽，已满时返回 `false`
    pub fn push(&mut self, instance: ParticleInstance) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.count as usize] = instance;
        self.count += 1;
        true
    }

    /// 本帧写入的实例 `[0, count)`
    pub fn as_slice(&self) -> &[ParticleInstance] {
        &self.slots[..self.count as usize]
    }

    /// 全部槽位（包括旧数据）
    pub fn slots(&self) -> &[ParticleInstance] {
        &self.slots
    }

    /// 本帧写入部分的字节视图，用于上传
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), (16 + 16 + 4) * 4);
    }

    #[test]
    fn test_instance_row_vector_layout() {
        // 行向量约定：平移在第四行，即第 4 个 16 字节块的前三个分量
        let world = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let instance = ParticleInstance::new(world, world, Vec4::ONE);
        assert_eq!(instance.world[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(instance.world_matrix(), world);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            ParticleInstanceBuffer::new(0).unwrap_err(),
            ParticleError::ZeroCapacity
        );
    }

    #[test]
    fn test_push_caps_at_capacity() {
        let mut buffer = ParticleInstanceBuffer::new(2).unwrap();
        assert!(buffer.push(ParticleInstance::default()));
        assert!(buffer.push(ParticleInstance::default()));
        assert!(!buffer.push(ParticleInstance::default()));
        assert_eq!(buffer.count(), 2);
        assert!(buffer.is_full());
        assert_eq!(buffer.as_bytes().len(), 2 * std::mem::size_of::<ParticleInstance>());
    }

    #[test]
    fn test_begin_frame_keeps_stale_slots() {
        let mut buffer = ParticleInstanceBuffer::new(4).unwrap();
        let red = ParticleInstance::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec4::new(1.0, 0.0, 0.0, 1.0));
        buffer.push(red);
        buffer.push(red);
        buffer.begin_frame();
        assert_eq!(buffer.count(), 0);
        assert!(buffer.as_slice().is_empty());
        assert_eq!(buffer.slots()[1], red);
    }
}
