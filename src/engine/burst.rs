// ==========================================
// 车间物资配送排期系统 - 突发配送策略
// ==========================================
// 职责: 选择突发长度 + 把单个配额拆分到突发的各天
// 红线: 拆分结果之和严格等于配额，且每天 >= 1
// ==========================================

use rand::Rng;

/// 默认突发长度下限（天）
pub const DEFAULT_BURST_MIN_DAYS: usize = 2;
/// 默认突发长度上限（天）
pub const DEFAULT_BURST_MAX_DAYS: usize = 4;
/// 默认抖动比例（±15%）
pub const DEFAULT_JITTER_RATIO: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstPolicy {
    pub min_days: usize,
    pub max_days: usize,
    pub jitter_ratio: f64,
}

impl Default for BurstPolicy {
    fn default() -> Self {
        Self {
            min_days: DEFAULT_BURST_MIN_DAYS,
            max_days: DEFAULT_BURST_MAX_DAYS,
            jitter_ratio: DEFAULT_JITTER_RATIO,
        }
    }
}

impl BurstPolicy {
    pub fn new(min_days: usize, max_days: usize, jitter_ratio: f64) -> Self {
        Self {
            min_days,
            max_days: max_days.max(min_days),
            jitter_ratio: jitter_ratio.clamp(0.0, 0.99),
        }
    }

    /// 选择突发长度
    ///
    /// 在 [min_days, max_days] 上均匀抽取，再裁剪到剩余窗口容量；
    /// 配额小于天数时按配额裁剪，保证每天至少 1 吨。
    pub fn pick_length<R: Rng>(&self, rng: &mut R, remaining_capacity: usize, quota: u64) -> usize {
        let drawn = rng.random_range(self.min_days..=self.max_days);
        let quota_cap = usize::try_from(quota).unwrap_or(usize::MAX);
        drawn.min(remaining_capacity).min(quota_cap)
    }

    /// 拆分配额
    ///
    /// 除最后一天外：`floor(quota / days) + floor(base × u)`，u ∈ [-jitter, +jitter)，
    /// 再夹到 [1, remaining - 后续天数]；最后一天取余量。
    ///
    /// 前置条件: `days >= 1` 且 `quota >= days`（由 `pick_length` 保证）
    pub fn split_quota<R: Rng>(&self, rng: &mut R, quota: u64, days: usize) -> Vec<u64> {
        if days == 0 {
            return Vec::new();
        }

        let base = quota / days as u64;
        let mut remaining = quota;
        let mut amounts = Vec::with_capacity(days);

        for i in 0..days - 1 {
            let variation = if self.jitter_ratio > 0.0 {
                let u = rng.random_range(-self.jitter_ratio..self.jitter_ratio);
                (base as f64 * u).floor() as i128
            } else {
                0
            };

            // 为后续每天至少留 1
            let days_after = (days - i - 1) as u64;
            let upper = remaining.saturating_sub(days_after).max(1);
            let proposed = base as i128 + variation;
            let amount = proposed.clamp(1, upper as i128) as u64;

            amounts.push(amount);
            remaining -= amount.min(remaining);
        }

        amounts.push(remaining);
        amounts
    }
}
