//! 引擎主入口
//!
//! 定义Engine结构和无界面的主运行循环

use crate::config::{EngineConfig, LoggingConfig};
use crate::core::resources::{RenderStats, Time};
use crate::render::camera::MainCamera;
use crate::render::particles::{
    particle_emit_system, particle_update_system, EmitEvent, GpuContext, GpuInstanceBuffer,
    ParticleDraw, ParticleSystem, ParticleSystemStats,
};
use bevy_ecs::prelude::*;
use std::time::Instant;

use super::error::EngineResult;

/// 运行结束后的汇总
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineReport {
    /// 实际运行的帧数
    pub frames: u32,
    /// 累计模拟时间（秒）
    pub elapsed_seconds: f64,
    /// 运行期间同时存活粒子数的峰值
    pub peak_alive: u32,
    /// 总绘制调用数
    pub draw_calls: u64,
    /// 是否使用了 GPU
    pub gpu_enabled: bool,
    /// 最后一帧的统计
    pub final_stats: ParticleSystemStats,
}

/// 粒子引擎主结构
///
/// `Engine` 负责：
/// - 初始化日志、ECS世界和可选的GPU上下文
/// - 按配置的帧数执行主循环
/// - 在指定帧触发脚本化的发射事件
///
/// # 示例
///
/// ```no_run
/// use particle_engine::config::EngineConfig;
/// use particle_engine::core::Engine;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let report = Engine::run(EngineConfig::load_or_default())?;
///     println!("{} particles emitted", report.final_stats.total_emitted);
///     Ok(())
/// }
/// ```
///
/// # 每帧流程
///
/// 1. **推进时间**：固定步长，或使用实测帧间隔
/// 2. **发送事件**：脚本中本帧的发射事件
/// 3. **运行调度**：发射系统 → 更新系统
/// 4. **上传**：把实例写入GPU缓冲区（若可用）
pub struct Engine;

impl Engine {
    /// 运行引擎主循环
    pub fn run(config: EngineConfig) -> EngineResult<EngineReport> {
        Self::initialize_logging(&config.logging);
        config.validate()?;

        let mut world = Self::initialize_world(&config)?;
        let mut schedule = Schedule::default();
        schedule.add_systems((particle_emit_system, particle_update_system).chain());

        let gpu = if config.render.use_gpu {
            Self::initialize_gpu(&config)
        } else {
            None
        };

        let report = Self::run_frames(&config, &mut world, &mut schedule, gpu.as_ref());

        tracing::info!(
            target: "engine",
            "Engine shutting down after {} frames ({} particles emitted)",
            report.frames,
            report.final_stats.total_emitted
        );
        Ok(report)
    }

    /// 初始化日志系统
    ///
    /// `RUST_LOG` 优先于配置中的日志级别。重复初始化会被忽略。
    fn initialize_logging(logging: &LoggingConfig) {
        if logging.log_to_console {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(logging.level.as_directive()));
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }
        tracing::info!(target: "engine", "Engine starting");
    }

    /// 创建ECS世界并插入资源
    fn initialize_world(config: &EngineConfig) -> EngineResult<World> {
        let mut particles = ParticleSystem::from_config(&config.simulation)?;
        particles.add_emitter(config.demo.emitter.build()?);
        for field in &config.demo.fields {
            particles.add_field(*field);
        }

        let mut world = World::new();
        world.insert_resource(Time::with_fixed_step(config.simulation.fixed_time_step as f64));
        world.insert_resource(MainCamera(config.render.camera));
        world.insert_resource(RenderStats::default());
        world.insert_resource(particles);
        world.init_resource::<Events<EmitEvent>>();

        tracing::info!(
            target: "engine",
            "World initialized: capacity {}, {} fields, blend mode {}",
            config.simulation.max_instances,
            config.demo.fields.len(),
            config.render.blend_mode.name()
        );
        Ok(world)
    }

    /// 创建GPU上下文和实例缓冲区；失败时退化为纯CPU模拟
    fn initialize_gpu(config: &EngineConfig) -> Option<(GpuContext, GpuInstanceBuffer)> {
        match GpuContext::new_headless() {
            Ok(context) => {
                tracing::info!(target: "engine", "Using GPU adapter: {}", context.adapter_name);
                let buffer = GpuInstanceBuffer::new(
                    &context.device,
                    config.simulation.max_instances,
                    config.render.blend_mode,
                );
                Some((context, buffer))
            }
            Err(e) => {
                tracing::warn!(target: "engine", "GPU unavailable, running CPU only: {}", e);
                None
            }
        }
    }

    /// 主循环
    fn run_frames(
        config: &EngineConfig,
        world: &mut World,
        schedule: &mut Schedule,
        gpu: Option<&(GpuContext, GpuInstanceBuffer)>,
    ) -> EngineReport {
        let mut peak_alive = 0;
        let mut draw_calls = 0u64;
        let mut last_frame = Instant::now();

        for frame in 0..config.demo.frames {
            let delta_seconds = if config.simulation.use_measured_delta {
                let now = Instant::now();
                let measured = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;
                measured
            } else {
                config.simulation.fixed_time_step
            };
            world.resource_mut::<Time>().advance(delta_seconds);

            for event in config.demo.events_at(frame) {
                tracing::debug!(target: "engine", "frame {}: {}", frame, event.name());
                world.send_event(event.clone());
            }

            schedule.run(world);
            world.resource_mut::<Events<EmitEvent>>().update();

            let draw = Self::submit(world, gpu, config);
            if !draw.is_empty() {
                draw_calls += 1;
            }

            let stats = world.resource::<ParticleSystem>().stats();
            peak_alive = peak_alive.max(stats.alive_count);

            let interval = config.demo.stats_interval;
            if interval > 0 && (frame + 1) % interval == 0 {
                tracing::info!(
                    target: "particles",
                    "frame {}: alive {}, instances {}, culled {}, emitted {}",
                    frame + 1,
                    stats.alive_count,
                    stats.instance_count,
                    stats.culled_by_capacity,
                    stats.total_emitted
                );
            }
        }

        EngineReport {
            frames: config.demo.frames,
            elapsed_seconds: world.resource::<Time>().elapsed_seconds,
            peak_alive,
            draw_calls,
            gpu_enabled: gpu.is_some(),
            final_stats: world.resource::<ParticleSystem>().stats(),
        }
    }

    /// 上传本帧实例并更新渲染统计
    fn submit(
        world: &mut World,
        gpu: Option<&(GpuContext, GpuInstanceBuffer)>,
        config: &EngineConfig,
    ) -> ParticleDraw {
        let instances = world.resource::<ParticleSystem>().instances();
        let (draw, uploaded_bytes) = match gpu {
            Some((context, buffer)) => {
                let draw = buffer.upload(&context.queue, instances);
                context.queue.submit(std::iter::empty());
                (draw, GpuInstanceBuffer::byte_size(draw.instance_count))
            }
            None => (
                ParticleDraw::from_instances(instances, config.render.blend_mode),
                0,
            ),
        };

        let mut stats = world.resource_mut::<RenderStats>();
        stats.draw_calls = if draw.is_empty() { 0 } else { 1 };
        stats.instances = draw.instance_count;
        stats.uploaded_bytes += uploaded_bytes;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_config(frames: u32) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.render.use_gpu = false;
        config.simulation.random_seed = Some(11);
        config.demo.frames = frames;
        config.demo.stats_interval = 0;
        config
    }

    #[test]
    fn test_run_cpu_only() {
        let report = Engine::run(cpu_config(120)).unwrap();
        assert_eq!(report.frames, 120);
        assert!(!report.gpu_enabled);
        assert!(report.final_stats.total_emitted > 0);
        assert!(report.peak_alive > 0);
        assert!((report.elapsed_seconds - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_run_is_deterministic_with_seed() {
        let first = Engine::run(cpu_config(200)).unwrap();
        let second = Engine::run(cpu_config(200)).unwrap();
        assert_eq!(first.final_stats, second.final_stats);
        assert_eq!(first.peak_alive, second.peak_alive);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = cpu_config(10);
        config.simulation.max_instances = 0;
        assert!(Engine::run(config).is_err());
    }
}
