//! 粒子随机数源
//!
//! 所有生成策略共享同一个可注入的随机数源。固定种子且调用顺序不变时，
//! 抽样序列稳定，可用于可复现的测试。

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 可播种的均匀分布随机数源
#[derive(Debug, Clone)]
pub struct ParticleRng {
    rng: StdRng,
}

impl ParticleRng {
    /// 使用固定种子创建
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 使用系统熵创建
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 可选种子：`None` 时使用系统熵
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// `[min, max]` 上的均匀分布；区间为空（`min >= max` 或 NaN）时返回 `min`
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if !(min < max) {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// `[-extent, extent]` 上的均匀分布
    pub fn symmetric(&mut self, extent: f32) -> f32 {
        self.range(-extent, extent)
    }

    /// 各分量独立取自 `[min, max]`，按 x、y、z 顺序抽样
    pub fn vec3(&mut self, min: f32, max: f32) -> Vec3 {
        let x = self.range(min, max);
        let y = self.range(min, max);
        let z = self.range(min, max);
        Vec3::new(x, y, z)
    }

    /// 各分量独立取自 `[-extent, extent]`
    pub fn symmetric_vec3(&mut self, extent: f32) -> Vec3 {
        self.vec3(-extent, extent)
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
