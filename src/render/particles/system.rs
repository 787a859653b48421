//! 粒子系统
//!
//! 持有粒子列表、发射器、加速度场和实例缓冲区。
//! 每帧的更新是对粒子列表的一次遍历，依次执行：
//! 到期移除 → 世界矩阵 → 广告牌 → 淡出 → 运动积分 → 场加速度 → 写入实例。

use crate::config::SimulationConfig;
use crate::core::error::ParticleResult;
use crate::math::{make_scale_matrix, make_translate_matrix, multiply};
use crate::render::camera::CameraView;
use crate::render::particles::effects::{self, EmitEvent};
use crate::render::particles::emitter::Emitter;
use crate::render::particles::field::{accumulated_acceleration, AccelerationField};
use crate::render::particles::instance::{ParticleInstance, ParticleInstanceBuffer};
use crate::render::particles::particle::Particle;
use crate::render::particles::random::ParticleRng;
use bevy_ecs::prelude::*;

/// 模拟开关
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSettings {
    /// 积分运动与年龄
    pub motion_enabled: bool,
    /// 应用加速度场
    pub fields_enabled: bool,
    /// 广告牌朝向相机
    pub billboard_enabled: bool,
    /// 发射器按频率自动发射
    pub continuous_emission: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            motion_enabled: true,
            fields_enabled: true,
            billboard_enabled: true,
            continuous_emission: true,
        }
    }
}

impl From<&SimulationConfig> for SimulationSettings {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            motion_enabled: config.motion_enabled,
            fields_enabled: config.fields_enabled,
            billboard_enabled: config.billboard_enabled,
            continuous_emission: config.continuous_emission,
        }
    }
}

/// 粒子系统统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParticleSystemStats {
    /// 当前存活粒子数
    pub alive_count: u32,
    /// 本帧写入的实例数
    pub instance_count: u32,
    /// 本帧因容量不足未绘制的粒子数
    pub culled_by_capacity: u32,
    /// 总发射数
    pub total_emitted: u64,
    /// 本帧发射数
    pub frame_emitted: u32,
}

/// 粒子系统资源
#[derive(Resource, Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    emitters: Vec<Emitter>,
    fields: Vec<AccelerationField>,
    instances: ParticleInstanceBuffer,
    rng: ParticleRng,
    settings: SimulationSettings,
    stats: ParticleSystemStats,
    /// 上次更新后发射的粒子数
    pending_emitted: u32,
}

impl ParticleSystem {
    /// 创建空的粒子系统
    pub fn new(max_instances: u32, rng: ParticleRng) -> ParticleResult<Self> {
        Ok(Self {
            particles: Vec::new(),
            emitters: Vec::new(),
            fields: Vec::new(),
            instances: ParticleInstanceBuffer::new(max_instances)?,
            rng,
            settings: SimulationSettings::default(),
            stats: ParticleSystemStats::default(),
            pending_emitted: 0,
        })
    }

    /// 按模拟配置创建
    pub fn from_config(config: &SimulationConfig) -> ParticleResult<Self> {
        let mut system = Self::new(
            config.max_instances,
            ParticleRng::from_seed_option(config.random_seed),
        )?;
        system.settings = SimulationSettings::from(config);
        Ok(system)
    }

    pub fn with_settings(mut self, settings: SimulationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn add_emitter(&mut self, emitter: Emitter) {
        self.emitters.push(emitter);
    }

    /// 按名称查找发射器
    pub fn emitter_mut(&mut self, name: &str) -> Option<&mut Emitter> {
        self.emitters.iter_mut().find(|emitter| emitter.name == name)
    }

    pub fn add_field(&mut self, field: AccelerationField) {
        self.fields.push(field);
    }

    pub fn push_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.record_emitted(1);
    }

    pub fn push_particles(&mut self, particles: impl IntoIterator<Item = Particle>) {
        let before = self.particles.len();
        self.particles.extend(particles);
        self.record_emitted(self.particles.len() - before);
    }

    /// 执行一个发射事件
    ///
    /// 使用第一个发射器的位置和数量；没有发射器时使用默认发射器。
    /// 返回生成的粒子数。
    pub fn emit(&mut self, event: &EmitEvent) -> usize {
        let spawned = match self.emitters.first() {
            Some(emitter) => effects::emit(event, emitter, &mut self.rng),
            None => effects::emit(event, &Emitter::default(), &mut self.rng),
        };
        let count = spawned.len();
        tracing::debug!(target: "particles", "{} spawned {} particles", event.name(), count);
        self.push_particles(spawned);
        count
    }

    /// 推进所有发射器的计时器，到期的发射器按自身形状发射一次
    pub fn tick_emitters(&mut self, delta_time: f32) -> usize {
        if !self.settings.continuous_emission {
            return 0;
        }
        let Self {
            particles,
            emitters,
            rng,
            ..
        } = self;

        let before = particles.len();
        for emitter in emitters.iter_mut() {
            if emitter.tick(delta_time) {
                particles.extend(emitter.emit(rng));
            }
        }
        let emitted = particles.len() - before;
        self.record_emitted(emitted);
        emitted
    }

    /// 更新所有粒子并重新填充实例缓冲区，返回写入的实例数
    ///
    /// 写入实例的是积分之前的位置和淡出值。
    pub fn update(&mut self, delta_time: f32, camera: &CameraView) -> u32 {
        let Self {
            particles,
            fields,
            instances,
            settings,
            ..
        } = self;

        instances.begin_frame();
        let mut culled = 0u32;

        particles.retain_mut(|particle| {
            if particle.is_expired() {
                return false;
            }

            let world = if settings.billboard_enabled {
                let scale = make_scale_matrix(particle.transform.scale);
                let translate = make_translate_matrix(particle.transform.translate);
                multiply(&multiply(&scale, &camera.billboard), &translate)
            } else {
                particle.transform.matrix()
            };
            let alpha = particle.fade_alpha();

            if settings.motion_enabled {
                particle.integrate(delta_time);
            }
            if settings.fields_enabled {
                particle.velocity += accumulated_acceleration(fields.as_slice(), particle.transform.translate);
            }

            let wvp = multiply(&world, &camera.view_projection);
            let color = particle.color.truncate().extend(alpha);
            if !instances.push(ParticleInstance::new(wvp, world, color)) {
                culled += 1;
            }
            true
        });

        self.stats.alive_count = self.particles.len() as u32;
        self.stats.instance_count = self.instances.count();
        self.stats.culled_by_capacity = culled;
        self.stats.frame_emitted = self.pending_emitted;
        self.pending_emitted = 0;

        self.instances.count()
    }

    /// 一帧完整的 CPU 模拟：发射器计时，然后更新
    pub fn advance(&mut self, delta_time: f32, camera: &CameraView) -> u32 {
        self.tick_emitters(delta_time);
        self.update(delta_time, camera)
    }

    /// 清除所有粒子并重置发射器计时
    pub fn clear(&mut self) {
        self.particles.clear();
        self.instances.begin_frame();
        self.pending_emitted = 0;
        for emitter in &mut self.emitters {
            emitter.reset();
        }
        self.stats.alive_count = 0;
        self.stats.instance_count = 0;
        self.stats.culled_by_capacity = 0;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn fields(&self) -> &[AccelerationField] {
        &self.fields
    }

    pub fn instances(&self) -> &ParticleInstanceBuffer {
        &self.instances
    }

    pub fn settings(&self) -> SimulationSettings {
        self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SimulationSettings {
        &mut self.settings
    }

    pub fn stats(&self) -> ParticleSystemStats {
        self.stats
    }

    pub fn rng_mut(&mut self) -> &mut ParticleRng {
        &mut self.rng
    }

    fn record_emitted(&mut self, count: usize) {
        self.pending_emitted = self.pending_emitted.saturating_add(count as u32);
        self.stats.total_emitted += count as u64;
    }
}
