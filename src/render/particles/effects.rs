//! 发射事件
//!
//! 调试界面上的按钮触发离散的具名事件，每个事件映射为一次生成调用；
//! 路径类效果（斩击）先预计算一条曲线，再沿曲线每一段生成一个粒子。

use crate::core::error::ParticleResult;
use crate::math::{arc_path, s_curve_path, spiral_path};
use crate::render::particles::emitter::{spawn, spawn_particle, Emitter, ParticleShape};
use crate::render::particles::particle::Particle;
use crate::render::particles::random::ParticleRng;
use bevy_ecs::prelude::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 发射事件
///
/// 角度单位为度；`steps` 为路径离散段数，也就是生成的粒子数。
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmitEvent {
    /// 点爆发
    Burst,
    /// 圆弧
    Arc {
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    /// 发射炮
    Cannon {
        spread_angle: f32,
        min_speed: f32,
        max_speed: f32,
    },
    /// 沿发射器周围圆弧的斩击
    Slash {
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        steps: u32,
        spread: f32,
    },
    /// 沿 S 形曲线的斩击（端点相对发射器）
    SlashS {
        start: Vec3,
        end: Vec3,
        amplitude: f32,
        frequency: f32,
        steps: u32,
        spread: f32,
    },
    /// 沿贝塞尔螺旋的斩击（控制点相对发射器）
    SlashSpiral {
        control: [Vec3; 4],
        radius: f32,
        turns: f32,
        steps: u32,
        spread: f32,
    },
    /// 平静水流
    WaterCalm { spread: f32 },
    /// 火焰
    FlameUnknowing { spread: f32 },
    /// 雷击（端点相对发射器）
    Thunder { start: Vec3, end: Vec3, jitter: f32 },
    /// 风暴
    WindStorm { spread: f32 },
}

impl EmitEvent {
    /// 事件名（用于日志）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Burst => "burst",
            Self::Arc { .. } => "arc",
            Self::Cannon { .. } => "cannon",
            Self::Slash { .. } => "slash",
            Self::SlashS { .. } => "slash_s",
            Self::SlashSpiral { .. } => "slash_spiral",
            Self::WaterCalm { .. } => "water_calm",
            Self::FlameUnknowing { .. } => "flame_unknowing",
            Self::Thunder { .. } => "thunder",
            Self::WindStorm { .. } => "wind_storm",
        }
    }

    /// 检查事件参数，非路径事件按对应形状的规则检查
    pub fn validate(&self) -> ParticleResult<()> {
        match self.shape(&Emitter::default()) {
            Some(shape) => shape.validate(),
            None => Ok(()),
        }
    }

    /// 非路径事件对应的生成形状
    pub fn shape(&self, emitter: &Emitter) -> Option<ParticleShape> {
        let origin = emitter.position();
        let shape = match *self {
            Self::Burst => ParticleShape::Burst,
            Self::Arc {
                radius,
                start_angle,
                end_angle,
            } => ParticleShape::Arc {
                radius,
                start_angle,
                end_angle,
            },
            Self::Cannon {
                spread_angle,
                min_speed,
                max_speed,
            } => ParticleShape::Cannon {
                spread_angle,
                min_speed,
                max_speed,
            },
            Self::WaterCalm { spread } => ParticleShape::Water { spread },
            Self::FlameUnknowing { spread } => ParticleShape::Flame { spread },
            Self::Thunder { start, end, jitter } => ParticleShape::Lightning {
                start: origin + start,
                end: origin + end,
                jitter,
            },
            Self::WindStorm { spread } => ParticleShape::Wind { spread },
            Self::Slash { .. } | Self::SlashS { .. } | Self::SlashSpiral { .. } => return None,
        };
        Some(shape)
    }

    /// 路径事件的离散路径（世界坐标）
    pub fn path(&self, emitter: &Emitter) -> Option<(Vec<Vec3>, f32)> {
        let origin = emitter.position();
        match *self {
            Self::Slash {
                radius,
                start_angle,
                end_angle,
                steps,
                spread,
            } => Some((arc_path(origin, radius, start_angle, end_angle, steps), spread)),
            Self::SlashS {
                start,
                end,
                amplitude,
                frequency,
                steps,
                spread,
            } => Some((
                s_curve_path(origin + start, origin + end, amplitude, frequency, steps),
                spread,
            )),
            Self::SlashSpiral {
                control,
                radius,
                turns,
                steps,
                spread,
            } => Some((spiral_path(control.map(|p| origin + p), radius, turns, steps), spread)),
            _ => None,
        }
    }
}

/// 执行一个发射事件
///
/// 非路径事件生成 `emitter.count` 个粒子；路径事件每段生成一个斩击粒子。
pub fn emit(event: &EmitEvent, emitter: &Emitter, rng: &mut ParticleRng) -> Vec<Particle> {
    if let Some(shape) = event.shape(emitter) {
        return spawn(&shape, emitter, rng);
    }
    match event.path(emitter) {
        Some((path, spread)) => path_particles(&path, spread, emitter, rng),
        None => Vec::new(),
    }
}

/// 沿路径每一段生成一个斩击粒子
fn path_particles(path: &[Vec3], spread: f32, emitter: &Emitter, rng: &mut ParticleRng) -> Vec<Particle> {
    path.windows(2)
        .map(|segment| {
            let shape = ParticleShape::Slash {
                start: segment[0],
                end: segment[1],
                spread,
            };
            spawn_particle(&shape, emitter, rng)
        })
        .collect()
}
