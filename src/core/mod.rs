//! 核心模块
//!
//! 包含引擎的核心功能：
//! - `engine` - 主引擎入口和运行循环
//! - `resources` - ECS资源定义
//! - `error` - 错误类型定义

pub mod engine;
pub mod error;
pub mod resources;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{
    EngineError, EngineResult, ParticleError, ParticleResult, RenderError, RenderResult,
};

// 重新导出主要类型
pub use engine::{Engine, EngineReport};
pub use resources::{RenderStats, Time};
