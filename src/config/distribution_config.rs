// ==========================================
// 车间物资配送排期系统 - 排期参数配置
// ==========================================
// 职责: 配置文件结构 + 默认值 → BurstPolicy / MaterialCatalog / 生成器
// ==========================================

use crate::domain::calendar::DEFAULT_WINDOW_DAYS;
use crate::domain::catalog::{MaterialCatalog, DEFAULT_MATERIALS};
use crate::engine::burst::{
    BurstPolicy, DEFAULT_BURST_MAX_DAYS, DEFAULT_BURST_MIN_DAYS, DEFAULT_JITTER_RATIO,
};
use crate::engine::distribution::{DistributionGenerator, DEFAULT_COVERAGE_DAYS};
use serde::{Deserialize, Serialize};

/// 配送计划配置（JSON 文件，所有字段可省略）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistributionConfig {
    /// 覆盖天数（从锚点日起）
    #[serde(default = "default_coverage_days")]
    pub coverage_days: usize,

    /// 日期窗口长度（以今天为中心）
    #[serde(default = "default_window_days")]
    pub window_days: usize,

    /// 突发长度下限（天）
    #[serde(default = "default_burst_min_days")]
    pub burst_min_days: usize,

    /// 突发长度上限（天）
    #[serde(default = "default_burst_max_days")]
    pub burst_max_days: usize,

    /// 每日数量抖动比例，0~1
    #[serde(default = "default_jitter_ratio")]
    pub jitter_ratio: f64,

    /// 随机种子（省略则每次不同）
    #[serde(default)]
    pub seed: Option<u64>,

    /// 物资目录
    #[serde(default = "default_material_catalog")]
    pub material_catalog: Vec<String>,
}

fn default_coverage_days() -> usize {
    DEFAULT_COVERAGE_DAYS
}
fn default_window_days() -> usize {
    DEFAULT_WINDOW_DAYS
}
fn default_burst_min_days() -> usize {
    DEFAULT_BURST_MIN_DAYS
}
fn default_burst_max_days() -> usize {
    DEFAULT_BURST_MAX_DAYS
}
fn default_jitter_ratio() -> f64 {
    DEFAULT_JITTER_RATIO
}
fn default_material_catalog() -> Vec<String> {
    DEFAULT_MATERIALS.iter().map(|m| m.to_string()).collect()
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            coverage_days: default_coverage_days(),
            window_days: default_window_days(),
            burst_min_days: default_burst_min_days(),
            burst_max_days: default_burst_max_days(),
            jitter_ratio: default_jitter_ratio(),
            seed: None,
            material_catalog: default_material_catalog(),
        }
    }
}

impl DistributionConfig {
    pub fn burst_policy(&self) -> BurstPolicy {
        BurstPolicy::new(self.burst_min_days, self.burst_max_days, self.jitter_ratio)
    }

    pub fn catalog(&self) -> MaterialCatalog {
        MaterialCatalog::new(self.material_catalog.iter().cloned())
    }

    pub fn generator(&self) -> DistributionGenerator {
        DistributionGenerator::new(self.coverage_days, self.burst_policy())
    }
}
