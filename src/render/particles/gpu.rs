//! GPU 实例上传
//!
//! 把 CPU 端的实例缓冲区写入 wgpu 缓冲区，并描述一次实例化绘制：
//! 每个粒子一个 6 顶点的四边形。管线本身（着色器、纹理）不在这里创建。

use crate::config::BlendMode;
use crate::core::error::{RenderError, RenderResult};
use crate::render::particles::instance::{ParticleInstance, ParticleInstanceBuffer};

/// 每个粒子四边形的顶点数（两个三角形）
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// 无界面 GPU 上下文
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_name: String,
}

impl GpuContext {
    /// 请求默认适配器和设备（阻塞）
    pub fn new_headless() -> RenderResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(
            instance.request_adapter(&wgpu::RequestAdapterOptions::default()),
        )
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Particle Device"),
                ..Default::default()
            },
            None,
        ))
        .map_err(|e| RenderError::DeviceRequest(e.to_string()))?;

        Ok(Self {
            device,
            queue,
            adapter_name: adapter.get_info().name,
        })
    }
}

/// GPU 端实例缓冲区
pub struct GpuInstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: u32,
    blend_mode: BlendMode,
}

impl GpuInstanceBuffer {
    /// 创建可容纳 `capacity` 个实例的缓冲区
    pub fn new(device: &wgpu::Device, capacity: u32, blend_mode: BlendMode) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Instance Buffer"),
            size: Self::byte_size(capacity),
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_DST
                | wgpu::BufferUsages::VERTEX,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            capacity,
            blend_mode,
        }
    }

    /// 容纳 `capacity` 个实例需要的字节数
    pub fn byte_size(capacity: u32) -> u64 {
        std::mem::size_of::<ParticleInstance>() as u64 * capacity as u64
    }

    /// 上传本帧写入的实例，返回对应的绘制描述
    pub fn upload(&self, queue: &wgpu::Queue, instances: &ParticleInstanceBuffer) -> ParticleDraw {
        let slice = instances.as_slice();
        let count = slice.len().min(self.capacity as usize);
        if count > 0 {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&slice[..count]));
        }
        ParticleDraw {
            vertex_count: QUAD_VERTEX_COUNT,
            instance_count: count as u32,
            blend_mode: self.blend_mode,
        }
    }
}

/// 一次实例化绘制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleDraw {
    pub vertex_count: u32,
    pub instance_count: u32,
    pub blend_mode: BlendMode,
}

impl ParticleDraw {
    /// 由 CPU 端缓冲区直接得到绘制描述（不上传）
    pub fn from_instances(instances: &ParticleInstanceBuffer, blend_mode: BlendMode) -> Self {
        Self {
            vertex_count: QUAD_VERTEX_COUNT,
            instance_count: instances.count(),
            blend_mode,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instance_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec4};

    #[test]
    fn test_instance_stride() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 144);
        assert_eq!(GpuInstanceBuffer::byte_size(1024), 144 * 1024);
    }

    #[test]
    fn test_draw_from_instances() {
        let mut buffer = ParticleInstanceBuffer::new(4).unwrap();
        let draw = ParticleDraw::from_instances(&buffer, BlendMode::Add);
        assert!(draw.is_empty());

        buffer.push(ParticleInstance::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ONE));
        buffer.push(ParticleInstance::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ONE));
        let draw = ParticleDraw::from_instances(&buffer, BlendMode::Normal);
        assert_eq!(draw.vertex_count, 6);
        assert_eq!(draw.instance_count, 2);
        assert_eq!(draw.blend_mode, BlendMode::Normal);
    }

    #[test]
    fn test_upload_clamps_to_gpu_capacity() {
        // 没有可用适配器的环境跳过
        let Ok(gpu) = GpuContext::new_headless() else {
            return;
        };
        let gpu_buffer = GpuInstanceBuffer::new(&gpu.device, 2, BlendMode::Screen);

        let mut instances = ParticleInstanceBuffer::new(4).unwrap();
        let draw = gpu_buffer.upload(&gpu.queue, &instances);
        assert!(draw.is_empty());

        for _ in 0..3 {
            instances.push(ParticleInstance::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ONE));
        }
        let draw = gpu_buffer.upload(&gpu.queue, &instances);
        assert_eq!(draw.instance_count, 2);
        assert_eq!(draw.vertex_count, QUAD_VERTEX_COUNT);
        assert_eq!(draw.blend_mode, BlendMode::Screen);
    }
}
