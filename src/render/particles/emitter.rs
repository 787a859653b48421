//! 粒子发射器与生成策略
//!
//! 发射器是一个具名的生成配置（位置/朝向、每次发射数量、自动发射间隔）。
//! 每种 [`ParticleShape`] 都是发射器配置与共享随机数源的纯函数，
//! 除了消耗随机数源外没有任何副作用。

use crate::core::error::{ParticleError, ParticleResult};
use crate::math::{transform_direction, Transform};
use crate::render::particles::particle::Particle;
use crate::render::particles::random::ParticleRng;
use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

// ============================================================================
// 生成形状
// ============================================================================

/// 生成形状（粒子原型）
///
/// 角度参数单位为度。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParticleShape {
    /// 点爆发
    Burst,
    /// 圆弧
    Arc {
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    /// 圆锥喷射（炮口）
    Cannon {
        spread_angle: f32,
        min_speed: f32,
        max_speed: f32,
    },
    /// 线段拖尾（斩击）
    Slash { start: Vec3, end: Vec3, spread: f32 },
    /// 上升火焰
    Flame { spread: f32 },
    /// 下落水滴
    Water { spread: f32 },
    /// 抖动闪电
    Lightning { start: Vec3, end: Vec3, jitter: f32 },
    /// 径向风
    Wind { spread: f32 },
}

impl Default for ParticleShape {
    fn default() -> Self {
        Self::Burst
    }
}

impl ParticleShape {
    /// 校验参数
    pub fn validate(&self) -> ParticleResult<()> {
        match *self {
            Self::Cannon {
                min_speed,
                max_speed,
                ..
            } if min_speed > max_speed => Err(ParticleError::InvalidRange {
                name: "cannon speed",
                min: min_speed,
                max: max_speed,
            }),
            Self::Arc {
                start_angle,
                end_angle,
                ..
            } if start_angle > end_angle => Err(ParticleError::InvalidRange {
                name: "arc angle",
                min: start_angle,
                max: end_angle,
            }),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// 发射器
// ============================================================================

/// 粒子发射器
#[derive(Debug, Clone)]
pub struct Emitter {
    /// 名称
    pub name: String,
    /// 位置与朝向
    pub transform: Transform,
    /// 每次发射的粒子数
    pub count: u32,
    /// 自动发射间隔（秒）
    pub frequency: f32,
    /// 距上次自动发射累计的时间（秒）
    pub frequency_time: f32,
    /// 自动发射使用的形状
    pub shape: ParticleShape,
    /// 是否参与自动发射
    pub enabled: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            name: "emitter".to_string(),
            transform: Transform::default(),
            count: 3,
            frequency: 0.5,
            frequency_time: 0.0,
            shape: ParticleShape::Burst,
            enabled: true,
        }
    }
}

impl Emitter {
    /// 创建发射器，`frequency` 必须为有限正数
    pub fn new(name: impl Into<String>, count: u32, frequency: f32) -> ParticleResult<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ParticleError::InvalidFrequency(frequency));
        }
        Ok(Self {
            name: name.into(),
            count,
            frequency,
            ..Default::default()
        })
    }

    /// 设置位置
    pub fn with_translation(mut self, translate: Vec3) -> Self {
        self.transform.translate = translate;
        self
    }

    /// 设置朝向（欧拉角，弧度）
    pub fn with_rotation(mut self, rotate: Vec3) -> Self {
        self.transform.rotate = rotate;
        self
    }

    /// 设置自动发射形状
    pub fn with_shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.translate
    }

    /// 推进自动发射计时器，返回本帧是否应发射一次
    ///
    /// 触发时减去 `frequency` 而不是清零，保留超出部分以维持长期平均速率。
    pub fn tick(&mut self, delta_time: f32) -> bool {
        if !self.enabled {
            return false;
        }
        self.frequency_time += delta_time;
        if self.frequency_time >= self.frequency {
            self.frequency_time -= self.frequency;
            true
        } else {
            false
        }
    }

    /// 按发射器自身的形状生成 `count` 个粒子
    pub fn emit(&self, rng: &mut ParticleRng) -> Vec<Particle> {
        spawn(&self.shape, self, rng)
    }

    /// 重置计时器
    pub fn reset(&mut self) {
        self.frequency_time = 0.0;
    }
}

// ============================================================================
// 生成策略
// ============================================================================

/// 按给定形状生成恰好 `emitter.count` 个粒子
pub fn spawn(shape: &ParticleShape, emitter: &Emitter, rng: &mut ParticleRng) -> Vec<Particle> {
    (0..emitter.count)
        .map(|_| spawn_particle(shape, emitter, rng))
        .collect()
}

/// 按给定形状生成单个粒子
pub fn spawn_particle(shape: &ParticleShape, emitter: &Emitter, rng: &mut ParticleRng) -> Particle {
    let origin = emitter.position();
    match *shape {
        ParticleShape::Burst => make_burst_particle(origin, rng),
        ParticleShape::Arc {
            radius,
            start_angle,
            end_angle,
        } => make_arc_particle(origin, radius, start_angle, end_angle, rng),
        ParticleShape::Cannon {
            spread_angle,
            min_speed,
            max_speed,
        } => make_cannon_particle(&emitter.transform, spread_angle, min_speed, max_speed, rng),
        ParticleShape::Slash { start, end, spread } => make_slash_particle(start, end, spread, rng),
        ParticleShape::Flame { spread } => make_flame_particle(origin, spread, rng),
        ParticleShape::Water { spread } => make_water_particle(origin, spread, rng),
        ParticleShape::Lightning { start, end, jitter } => {
            make_lightning_particle(start, end, jitter, rng)
        }
        ParticleShape::Wind { spread } => make_wind_particle(origin, spread, rng),
    }
}

/// 随机 RGB，alpha 为 1
fn random_color(rng: &mut ParticleRng) -> Vec4 {
    let rgb = rng.vec3(0.0, 1.0);
    rgb.extend(1.0)
}

fn make_burst_particle(origin: Vec3, rng: &mut ParticleRng) -> Particle {
    let translate = origin + rng.symmetric_vec3(1.0);
    let velocity = rng.symmetric_vec3(1.0);
    let color = random_color(rng);
    let life_time = rng.range(1.0, 3.0);
    Particle::new(translate, velocity, color, life_time)
}

fn make_arc_particle(
    center: Vec3,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    rng: &mut ParticleRng,
) -> Particle {
    let angle = rng.range(start_angle, end_angle).to_radians();
    let (sin, cos) = angle.sin_cos();
    let translate = center + Vec3::new(cos, sin, 0.0) * radius;
    let velocity = Vec3::new(-sin, cos, 0.0);
    let color = random_color(rng);
    let life_time = rng.range(1.0, 5.0);
    Particle::new(translate, velocity, color, life_time)
}

/// 发射方向的右/上基向量，`right = normalize(cross(up, forward))`
fn cannon_basis(forward: Vec3) -> (Vec3, Vec3) {
    let mut right = Vec3::Y.cross(forward).normalize_or_zero();
    if right == Vec3::ZERO {
        // forward 与世界上方向平行
        right = Vec3::X;
    }
    let up = forward.cross(right).normalize_or_zero();
    (right, up)
}

fn make_cannon_particle(
    transform: &Transform,
    spread_angle: f32,
    min_speed: f32,
    max_speed: f32,
    rng: &mut ParticleRng,
) -> Particle {
    let forward = transform_direction(transform, Vec3::Z).normalize_or_zero();
    let (right, up) = cannon_basis(forward);

    let spread = spread_angle.to_radians();
    let yaw = rng.symmetric(spread);
    let pitch = rng.symmetric(spread);
    let deviation = Quat::from_axis_angle(up, yaw) * Quat::from_axis_angle(right, pitch);
    let direction = (deviation * forward).normalize_or_zero();

    let speed = rng.range(min_speed, max_speed);
    let life_time = rng.range(0.2, 1.0);
    let color = Vec4::new(1.0, rng.range(0.5, 1.0), rng.range(0.0, 0.3), 1.0);
    Particle::new(transform.translate, direction * speed, color, life_time)
}

fn make_slash_particle(start: Vec3, end: Vec3, spread: f32, rng: &mut ParticleRng) -> Particle {
    let t = rng.range(0.0, 1.0);
    let translate = start.lerp(end, t) + rng.symmetric_vec3(spread);
    let velocity = (end - start).normalize_or_zero() * rng.range(0.5, 1.5);
    let life_time = rng.range(0.5, 2.0);
    let color = Vec4::new(rng.range(0.6, 1.0), rng.range(0.6, 1.0), 1.0, 1.0);

    let mut particle = Particle::new(translate, velocity, color, life_time);
    particle.transform.scale = rng.vec3(0.5, 1.5);
    particle
}

fn make_flame_particle(center: Vec3, spread: f32, rng: &mut ParticleRng) -> Particle {
    let translate = center + rng.symmetric_vec3(spread);
    let velocity = Vec3::new(0.0, rng.range(0.5, 1.5) * 2.0, 0.0);
    let life_time = rng.range(1.0, 3.0);
    let color = Vec4::new(rng.range(0.8, 1.0), rng.range(0.2, 0.5), 0.0, 1.0);
    Particle::new(translate, velocity, color, life_time)
}

fn make_water_particle(center: Vec3, spread: f32, rng: &mut ParticleRng) -> Particle {
    let translate = center + rng.symmetric_vec3(spread);
    let velocity = Vec3::new(rng.range(-0.2, 0.2), -1.0, rng.range(-0.2, 0.2));
    let life_time = rng.range(1.5, 4.0);
    let color = Vec4::new(
        rng.range(0.0, 0.2),
        rng.range(0.4, 0.7),
        rng.range(0.8, 1.0),
        0.8,
    );
    Particle::new(translate, velocity, color, life_time)
}

/// 闪电粒子速度
const LIGHTNING_SPEED: f32 = 20.0;

fn make_lightning_particle(start: Vec3, end: Vec3, jitter: f32, rng: &mut ParticleRng) -> Particle {
    let t = rng.range(0.0, 1.0);
    let translate = start.lerp(end, t) + rng.symmetric_vec3(jitter);
    let velocity = (end - start).normalize_or_zero() * LIGHTNING_SPEED;
    let life_time = rng.range(0.2, 0.8);
    let color = Vec4::new(rng.range(0.8, 1.0), rng.range(0.8, 1.0), 1.0, 1.0);
    Particle::new(translate, velocity, color, life_time)
}

fn make_wind_particle(center: Vec3, spread: f32, rng: &mut ParticleRng) -> Particle {
    let offset = rng.symmetric_vec3(spread);
    let translate = center + Vec3::new(offset.x, offset.y * 0.5, offset.z);
    let velocity = rng.symmetric_vec3(1.0) * Vec3::new(0.5, 0.1, 0.3);
    let life_time = rng.range(2.0, 5.0);
    let color = rng.vec3(0.8, 1.0).extend(0.5);
    Particle::new(translate, velocity, color, life_time)
}

// ============================================================================
// 测试
// ============================================================================
