//! 统一错误处理模块
//!
//! ## 错误类型分层
//!
//! - **粒子错误** (`ParticleError`): 发射器、作用域、实例缓冲区的参数校验错误
//! - **渲染错误** (`RenderError`): GPU 适配器与设备初始化错误
//! - **配置错误** (`config::ConfigError`): 配置文件读取、解析与校验错误
//!
//! `EngineError` 聚合以上所有错误。模拟步骤本身不会失败：
//! 实例容量溢出按设计静默截断，不作为错误上报。

use crate::config::ConfigError;
use glam::Vec3;
use thiserror::Error;

/// 引擎核心错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Particle error: {0}")]
    Particle(#[from] ParticleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 渲染系统错误
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("Failed to request adapter: no compatible GPU found")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    DeviceRequest(String),
}

/// 粒子系统参数错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    #[error("Invalid emitter frequency: {0} (must be finite and greater than zero)")]
    InvalidFrequency(f32),

    #[error("Invalid field bounds: min {min:?} exceeds max {max:?}")]
    InvalidBounds { min: Vec3, max: Vec3 },

    #[error("Instance capacity must be greater than zero")]
    ZeroCapacity,

    #[error("Invalid {name} range: {min} > {max}")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
}

/// 引擎结果类型别名
pub type EngineResult<T> = Result<T, EngineError>;
pub type RenderResult<T> = Result<T, RenderError>;
pub type ParticleResult<T> = Result<T, ParticleError>;
