//! 核心宏定义
//!
//! 提供统一的宏来减少配置结构体的样板代码

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```ignore
/// struct DemoConfig {
///     frames: u32,
///     stats_interval: u32,
/// }
///
/// impl_default!(DemoConfig {
///     frames: 600,
///     stats_interval: 60,
/// });
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

/// 同时实现Default和new()的宏
///
/// 使用示例:
/// ```ignore
/// struct SimulationConfig {
///     max_instances: u32,
///     motion_enabled: bool,
/// }
///
/// impl_default_and_new!(SimulationConfig {
///     max_instances: 1024,
///     motion_enabled: true,
/// });
/// ```
#[macro_export]
macro_rules! impl_default_and_new {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }

        impl $struct_name {
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}
