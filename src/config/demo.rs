use super::{ConfigError, ConfigResult};
use crate::core::error::ParticleResult;
use crate::impl_default;
use crate::render::particles::effects::EmitEvent;
use crate::render::particles::emitter::{Emitter, ParticleShape};
use crate::render::particles::field::{Aabb, AccelerationField};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 无界面演示配置
///
/// 代替调试界面：按帧号触发发射事件，运行固定帧数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// 运行帧数
    pub frames: u32,

    /// 每隔多少帧输出一次统计日志（0 = 不输出）
    pub stats_interval: u32,

    /// 主发射器
    pub emitter: EmitterConfig,

    /// 加速度场
    pub fields: Vec<AccelerationField>,

    /// 脚本化发射事件
    pub script: Vec<ScheduledEmit>,
}

impl_default!(DemoConfig {
    frames: 600,
    stats_interval: 60,
    emitter: EmitterConfig::default(),
    fields: vec![AccelerationField::new(
        Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        },
        Vec3::new(0.05, 0.0, 0.0),
    )],
    script: default_script(),
});

impl DemoConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.emitter
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        for field in &self.fields {
            field
                .area
                .validate()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }
        for scheduled in &self.script {
            scheduled.event.validate().map_err(|e| {
                ConfigError::ValidationError(format!("frame {}: {}", scheduled.frame, e))
            })?;
        }
        Ok(())
    }

    /// 某一帧需要触发的事件
    pub fn events_at(&self, frame: u32) -> impl Iterator<Item = &EmitEvent> {
        self.script
            .iter()
            .filter(move |scheduled| scheduled.frame == frame)
            .map(|scheduled| &scheduled.event)
    }
}

/// 发射器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub name: String,
    pub translate: Vec3,
    /// 欧拉角（弧度）
    pub rotate: Vec3,
    pub count: u32,
    /// 自动发射间隔（秒）
    pub frequency: f32,
    pub shape: ParticleShape,
}

impl_default!(EmitterConfig {
    name: "main".to_string(),
    translate: Vec3::ZERO,
    rotate: Vec3::ZERO,
    count: 3,
    frequency: 0.5,
    shape: ParticleShape::Burst,
});

impl EmitterConfig {
    pub fn validate(&self) -> ParticleResult<()> {
        self.shape.validate()?;
        Emitter::new(self.name.clone(), self.count, self.frequency).map(|_| ())
    }

    /// 构建发射器
    pub fn build(&self) -> ParticleResult<Emitter> {
        self.shape.validate()?;
        Ok(Emitter::new(self.name.clone(), self.count, self.frequency)?
            .with_translation(self.translate)
            .with_rotation(self.rotate)
            .with_shape(self.shape.clone()))
    }
}

/// 在指定帧触发的发射事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEmit {
    pub frame: u32,
    pub event: EmitEvent,
}

fn default_script() -> Vec<ScheduledEmit> {
    let events = vec![
        EmitEvent::Burst,
        EmitEvent::Arc {
            radius: 2.0,
            start_angle: 0.0,
            end_angle: 180.0,
        },
        EmitEvent::Cannon {
            spread_angle: 15.0,
            min_speed: 3.0,
            max_speed: 6.0,
        },
        EmitEvent::Slash {
            radius: 2.0,
            start_angle: -45.0,
            end_angle: 135.0,
            steps: 32,
            spread: 0.05,
        },
        EmitEvent::SlashS {
            start: Vec3::new(-3.0, 0.0, 0.0),
            end: Vec3::new(3.0, 0.0, 0.0),
            amplitude: 1.0,
            frequency: 1.0,
            steps: 48,
            spread: 0.05,
        },
        EmitEvent::SlashSpiral {
            control: [
                Vec3::new(0.0, -2.0, 0.0),
                Vec3::new(2.0, -1.0, 0.0),
                Vec3::new(-2.0, 1.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
            ],
            radius: 1.5,
            turns: 3.0,
            steps: 64,
            spread: 0.05,
        },
        EmitEvent::WaterCalm { spread: 0.5 },
        EmitEvent::FlameUnknowing { spread: 0.3 },
        EmitEvent::Thunder {
            start: Vec3::new(0.0, 4.0, 0.0),
            end: Vec3::new(0.5, -2.0, 0.0),
            jitter: 0.2,
        },
        EmitEvent::WindStorm { spread: 2.0 },
    ];
    events
        .into_iter()
        .enumerate()
        .map(|(i, event)| ScheduledEmit {
            frame: 30 * (i as u32 + 1),
            event,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_demo_valid() {
        let demo = DemoConfig::default();
        assert!(demo.validate().is_ok());
        assert_eq!(demo.script.len(), 10);
        assert_eq!(demo.events_at(30).count(), 1);
        assert_eq!(demo.events_at(31).count(), 0);
    }

    #[test]
    fn test_inverted_field_rejected() {
        let mut demo = DemoConfig::default();
        demo.fields[0].area.min = Vec3::splat(2.0);
        assert!(matches!(
            demo.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_inverted_script_event_rejected() {
        let mut demo = DemoConfig::default();
        demo.script.push(ScheduledEmit {
            frame: 5,
            event: EmitEvent::Cannon {
                spread_angle: 15.0,
                min_speed: 6.0,
                max_speed: 3.0,
            },
        });
        let err = demo.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("frame 5")));

        demo.script.pop();
        demo.script[1].event = EmitEvent::Arc {
            radius: 2.0,
            start_angle: 180.0,
            end_angle: 0.0,
        };
        assert!(demo.validate().is_err());
    }

    #[test]
    fn test_emitter_build() {
        let config = EmitterConfig {
            translate: Vec3::new(1.0, 2.0, 3.0),
            count: 7,
            ..Default::default()
        };
        let emitter = config.build().unwrap();
        assert_eq!(emitter.count, 7);
        assert_eq!(emitter.position(), Vec3::new(1.0, 2.0, 3.0));

        let bad = EmitterConfig {
            frequency: -1.0,
            ..Default::default()
        };
        assert!(bad.build().is_err());
    }
}
