use super::{ConfigError, ConfigResult};
use crate::impl_default;
use crate::render::camera::Camera;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 渲染配置
///
/// 混合模式是显式的配置值，只传给渲染层；模拟步骤从不读取它。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 粒子混合模式
    pub blend_mode: BlendMode,

    /// 尝试创建 GPU 设备并上传实例数据（无可用适配器时退化为纯 CPU）
    pub use_gpu: bool,

    /// 主相机
    pub camera: Camera,
}

impl_default!(RenderConfig {
    blend_mode: BlendMode::Add,
    use_gpu: true,
    camera: Camera::default(),
});

impl RenderConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        let camera = &self.camera;
        if camera.near_clip <= 0.0 || camera.far_clip <= camera.near_clip {
            return Err(ConfigError::ValidationError(format!(
                "Invalid clip planes: near {}, far {}",
                camera.near_clip, camera.far_clip
            )));
        }
        if camera.aspect_ratio <= 0.0 || camera.fov_y <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Camera fov_y and aspect_ratio must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// 混合模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// 不混合
    None,
    /// 通常 α 混合：`Src * SrcA + Dest * (1 - SrcA)`
    Normal,
    /// 加算：`Src * SrcA + Dest`
    Add,
    /// 减算：`Dest - Src * SrcA`
    Subtract,
    /// 乘算：`Dest * Src`
    Multiply,
    /// 滤色：`Src * (1 - Dest) + Dest`
    Screen,
}

impl BlendMode {
    pub const ALL: [BlendMode; 6] = [
        BlendMode::None,
        BlendMode::Normal,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::Multiply,
        BlendMode::Screen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BlendMode::None => "none",
            BlendMode::Normal => "normal",
            BlendMode::Add => "add",
            BlendMode::Subtract => "subtract",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
        }
    }

    /// 对应的 wgpu 混合状态，`None` 表示关闭混合
    ///
    /// alpha 通道统一为 `One * Src + Zero * Dest`。
    pub fn blend_state(self) -> Option<wgpu::BlendState> {
        use wgpu::{BlendComponent, BlendFactor, BlendOperation};

        let color = match self {
            BlendMode::None => return None,
            BlendMode::Normal => BlendComponent {
                src_factor: BlendFactor::SrcAlpha,
                dst_factor: BlendFactor::OneMinusSrcAlpha,
                operation: BlendOperation::Add,
            },
            BlendMode::Add => BlendComponent {
                src_factor: BlendFactor::SrcAlpha,
                dst_factor: BlendFactor::One,
                operation: BlendOperation::Add,
            },
            BlendMode::Subtract => BlendComponent {
                src_factor: BlendFactor::SrcAlpha,
                dst_factor: BlendFactor::One,
                operation: BlendOperation::ReverseSubtract,
            },
            BlendMode::Multiply => BlendComponent {
                src_factor: BlendFactor::Zero,
                dst_factor: BlendFactor::Src,
                operation: BlendOperation::Add,
            },
            BlendMode::Screen => BlendComponent {
                src_factor: BlendFactor::OneMinusDst,
                dst_factor: BlendFactor::One,
                operation: BlendOperation::Add,
            },
        };

        Some(wgpu::BlendState {
            color,
            alpha: BlendComponent::REPLACE,
        })
    }
}

impl FromStr for BlendMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        BlendMode::ALL
            .into_iter()
            .find(|mode| mode.name() == lower)
            .ok_or_else(|| ConfigError::ParseError(format!("Unknown blend mode: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_mode_from_str() {
        assert_eq!("Add".parse::<BlendMode>().unwrap(), BlendMode::Add);
        assert_eq!(" screen ".parse::<BlendMode>().unwrap(), BlendMode::Screen);
        assert!("overlay".parse::<BlendMode>().is_err());
    }

    #[test]
    fn test_blend_states() {
        assert!(BlendMode::None.blend_state().is_none());

        let add = BlendMode::Add.blend_state().unwrap();
        assert_eq!(add.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(add.alpha, wgpu::BlendComponent::REPLACE);

        let subtract = BlendMode::Subtract.blend_state().unwrap();
        assert_eq!(subtract.color.operation, wgpu::BlendOperation::ReverseSubtract);

        let normal = BlendMode::Normal.blend_state().unwrap();
        assert_eq!(normal.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }

    #[test]
    fn test_invalid_clip_planes() {
        let mut config = RenderConfig::default();
        config.camera.far_clip = 0.05;
        assert!(config.validate().is_err());
    }
}
