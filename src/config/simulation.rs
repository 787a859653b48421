use super::{ConfigError, ConfigResult};
use crate::impl_default_and_new;
use crate::render::particles::instance::DEFAULT_MAX_INSTANCES;
use serde::{Deserialize, Serialize};

/// 粒子模拟配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 实例缓冲区容量（最多绘制的粒子数）
    pub max_instances: u32,

    /// 固定时间步长（秒）
    pub fixed_time_step: f32,

    /// 使用实测帧间隔代替固定步长
    pub use_measured_delta: bool,

    /// 随机种子（`None` 使用系统熵）
    pub random_seed: Option<u64>,

    /// 积分运动与年龄
    pub motion_enabled: bool,

    /// 应用加速度场
    pub fields_enabled: bool,

    /// 广告牌朝向相机
    pub billboard_enabled: bool,

    /// 发射器按频率自动发射
    pub continuous_emission: bool,
}

impl_default_and_new!(SimulationConfig {
    max_instances: DEFAULT_MAX_INSTANCES,
    fixed_time_step: 1.0 / 60.0,
    use_measured_delta: false,
    random_seed: None,
    motion_enabled: true,
    fields_enabled: true,
    billboard_enabled: true,
    continuous_emission: true,
});

impl SimulationConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_instances == 0 {
            return Err(ConfigError::ValidationError(
                "max_instances must be greater than zero".to_string(),
            ));
        }
        if !self.fixed_time_step.is_finite() || self.fixed_time_step <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "Invalid fixed_time_step: {}",
                self.fixed_time_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        let config = SimulationConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_instances, DEFAULT_MAX_INSTANCES);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = SimulationConfig {
            max_instances: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SimulationConfig = toml::from_str("billboard_enabled = false").unwrap();
        assert!(!config.billboard_enabled);
        assert!(config.motion_enabled);
        assert_eq!(config.random_seed, None);
    }
}
