//! 核心资源类型
//!
//! 定义引擎运行时使用的ECS资源

use bevy_ecs::prelude::*;

/// 帧时间
#[derive(Resource, Debug, Clone)]
pub struct Time {
    /// 本帧时间步长（秒）
    pub delta_seconds: f32,
    /// 累计运行时间（秒）
    pub elapsed_seconds: f64,
    /// 固定时间步长（秒）
    pub fixed_time_step: f64,
    /// 已推进的帧数
    pub frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            delta_seconds: 0.0,
            elapsed_seconds: 0.0,
            fixed_time_step: 1.0 / 60.0,
            frame_count: 0,
        }
    }
}

impl Time {
    pub fn with_fixed_step(fixed_time_step: f64) -> Self {
        Self {
            fixed_time_step,
            ..Default::default()
        }
    }

    /// 推进一帧
    pub fn advance(&mut self, delta_seconds: f32) {
        self.delta_seconds = delta_seconds;
        self.elapsed_seconds += delta_seconds as f64;
        self.frame_count += 1;
    }
}

/// 渲染统计信息
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct RenderStats {
    /// Draw Call 数量
    pub draw_calls: u32,
    /// 本帧实例数量
    pub instances: u32,
    /// 上传到 GPU 的字节数
    pub uploaded_bytes: u64,
}
