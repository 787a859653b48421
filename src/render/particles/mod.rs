//! 粒子系统模块
//!
//! CPU 端模拟、实例化渲染数据准备，以及可选的 GPU 上传。
//!
//! ## 架构设计
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Particle System                       │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Emission                                             │
//! │     - 发射器按频率自动发射                                 │
//! │     - 发射事件（爆发、圆弧、炮、斩击、水、火、雷、风）       │
//! │                                                          │
//! │  2. Simulation (单次遍历)                                 │
//! │     - 到期移除                                            │
//! │     - 广告牌世界矩阵、线性淡出                              │
//! │     - 速度积分、加速度场                                   │
//! │                                                          │
//! │  3. Instancing                                           │
//! │     - 固定容量实例缓冲区，溢出静默截断                       │
//! │     - 上传到 wgpu 缓冲区，每粒子一个四边形                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! let mut particles = ParticleSystem::new(1024, ParticleRng::seeded(7))?;
//! particles.add_emitter(Emitter::new("main", 3, 0.5)?);
//! particles.emit(&EmitEvent::Burst);
//!
//! let camera = Camera::default();
//! let instances = particles.advance(1.0 / 60.0, &camera.view());
//! ```

pub mod effects;
pub mod emitter;
pub mod field;
pub mod gpu;
pub mod instance;
pub mod particle;
pub mod random;
pub mod system;
pub mod systems;


pub use effects::EmitEvent;
pub use emitter::{spawn, spawn_particle, Emitter, ParticleShape};
pub use field::{accumulated_acceleration, Aabb, AccelerationField};
pub use gpu::{GpuContext, GpuInstanceBuffer, ParticleDraw, QUAD_VERTEX_COUNT};
pub use instance::{ParticleInstance, ParticleInstanceBuffer, DEFAULT_MAX_INSTANCES};
pub use particle::Particle;
pub use random::ParticleRng;
pub use system::{ParticleSystem, ParticleSystemStats, SimulationSettings};
pub use systems::{particle_emit_system, particle_update_system};
