// ==========================================
// 车间物资配送排期系统 - 配送计划生成引擎
// ==========================================
// 职责: 车间配额 → 按日历锚定的分阶段配送条目
// 输入: 车间列表 + 物资目录 + 日期窗口 + 覆盖天数 + 随机决策源
// 输出: 按日期升序的 DeliveryEntry 列表 + 覆盖缺口
// ==========================================
// 红线: 纯函数，无副作用（日志除外）
// 红线: 完整处理的 (车间, 物资) 条目之和严格等于配额
// ==========================================

use crate::domain::calendar::{DayToken, DayWindow};
use crate::domain::catalog::MaterialCatalog;
use crate::domain::delivery::DeliveryEntry;
use crate::domain::types::{CoverageGap, CoverageGapKind};
use crate::domain::workshop::Workshop;
use crate::engine::burst::BurstPolicy;
use crate::engine::random::DecisionSource;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// 默认覆盖天数
pub const DEFAULT_COVERAGE_DAYS: usize = 45;

// ==========================================
// DistributionResult - 生成结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct DistributionResult {
    pub entries: Vec<DeliveryEntry>,
    pub coverage_gaps: Vec<CoverageGap>,
    pub anchor_date: Option<String>, // None: 窗口内没有晚于今天的日期
    pub valid_days: usize,           // 有效切片长度
    pub seed: u64,                   // 本次使用的随机种子
}

impl DistributionResult {
    fn empty(seed: u64) -> Self {
        Self {
            entries: Vec::new(),
            coverage_gaps: Vec::new(),
            anchor_date: None,
            valid_days: 0,
            seed,
        }
    }

    /// 是否存在未排产配额
    pub fn has_coverage_gaps(&self) -> bool {
        !self.coverage_gaps.is_empty()
    }
}

// ==========================================
// DistributionGenerator - 配送计划生成引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct DistributionGenerator {
    coverage_days: usize,
    policy: BurstPolicy,
}

impl Default for DistributionGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_COVERAGE_DAYS, BurstPolicy::default())
    }
}

impl DistributionGenerator {
    pub fn new(coverage_days: usize, policy: BurstPolicy) -> Self {
        Self {
            coverage_days,
            policy,
        }
    }

    pub fn coverage_days(&self) -> usize {
        self.coverage_days
    }

    /// 锚点下标：第一个规范日期严格晚于今天的窗口下标
    pub fn anchor_index<D: DayToken>(window: &DayWindow<D>) -> Option<usize> {
        let today = window.today().canonical();
        window.days().iter().position(|d| d.canonical() > today)
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成配送计划
    ///
    /// 规则：
    /// 1) 有效切片 = [锚点, 锚点 + coverage_days)，按窗口长度裁剪
    /// 2) 车间起始游标 = 车间在列表中的序号（错开首批配送）
    /// 3) 按配额声明顺序处理，目录外物资跳过
    /// 4) 每种物资一次突发（2~4 天），阶段号 +1
    /// 5) 游标越过切片末尾后，该车间剩余物资记为覆盖缺口
    /// 6) 结果按日期稳定排序
    #[instrument(skip_all, fields(
        workshops = workshops.len(),
        catalog = catalog.len(),
        window = window.len(),
        coverage_days = self.coverage_days,
        seed = source.seed()
    ))]
    pub fn generate<D: DayToken>(
        &self,
        workshops: &[Workshop],
        catalog: &MaterialCatalog,
        window: &DayWindow<D>,
        source: &DecisionSource,
    ) -> DistributionResult {
        let anchor = match Self::anchor_index(window) {
            Some(idx) => idx,
            None => {
                warn!(
                    today = %window.today().canonical(),
                    "日期窗口内没有晚于今天的日期，返回空计划"
                );
                return DistributionResult::empty(source.seed());
            }
        };

        let end = anchor.saturating_add(self.coverage_days).min(window.len());
        let valid_days: Vec<String> = window.days()[anchor..end]
            .iter()
            .map(DayToken::canonical)
            .collect();

        let mut entries = Vec::new();
        let mut coverage_gaps = Vec::new();

        for (workshop_idx, workshop) in workshops.iter().enumerate() {
            self.schedule_workshop(
                workshop_idx,
                workshop,
                catalog,
                &valid_days,
                source,
                &mut entries,
                &mut coverage_gaps,
            );
        }

        // 稳定排序：同日条目保持生成顺序
        entries.sort_by(|a, b| a.date().cmp(b.date()));

        if !coverage_gaps.is_empty() {
            warn!(
                gaps = coverage_gaps.len(),
                unscheduled_t = coverage_gaps.iter().fold(0u64, |acc, g| acc.saturating_add(g.quota)),
                "部分配额未能在有效窗口内排产"
            );
        }
        info!(
            entries = entries.len(),
            anchor = ?valid_days.first(),
            valid_days = valid_days.len(),
            "配送计划生成完成"
        );

        DistributionResult {
            entries,
            coverage_gaps,
            anchor_date: Some(window.days()[anchor].canonical()),
            valid_days: valid_days.len(),
            seed: source.seed(),
        }
    }

    /// 单车间排产
    #[allow(clippy::too_many_arguments)]
    fn schedule_workshop(
        &self,
        workshop_idx: usize,
        workshop: &Workshop,
        catalog: &MaterialCatalog,
        valid_days: &[String],
        source: &DecisionSource,
        entries: &mut Vec<DeliveryEntry>,
        coverage_gaps: &mut Vec<CoverageGap>,
    ) {
        let mut cursor = workshop_idx;
        let mut stage: u32 = 1;

        for (material_idx, (material, quota)) in workshop.quotas.iter().enumerate() {
            if !catalog.contains(material) {
                debug!(workshop = %workshop.workshop_id, material, "物资不在目录中，跳过");
                continue;
            }

            if cursor >= valid_days.len() {
                coverage_gaps.extend(Self::exhausted_gaps(workshop, catalog, material_idx));
                break;
            }

            if quota == 0 {
                debug!(workshop = %workshop.workshop_id, material, "配额为 0，跳过");
                continue;
            }

            let mut rng = source.rng_for(workshop_idx, material_idx);
            let length = self
                .policy
                .pick_length(&mut rng, valid_days.len() - cursor, quota);
            if length == 0 {
                coverage_gaps.push(CoverageGap {
                    workshop_id: workshop.workshop_id.clone(),
                    material: material.to_string(),
                    quota,
                    kind: CoverageGapKind::EmptyBurst,
                });
                continue;
            }

            let amounts = self.policy.split_quota(&mut rng, quota, length);
            for (offset, amount) in amounts.into_iter().enumerate() {
                entries.push(DeliveryEntry::new(
                    valid_days[cursor + offset].clone(),
                    workshop.workshop_id.clone(),
                    workshop.manager.clone(),
                    workshop.phone.clone(),
                    material.to_string(),
                    amount,
                    stage,
                ));
            }

            debug!(
                workshop = %workshop.workshop_id,
                material,
                stage,
                start = %valid_days[cursor],
                days = length,
                quota,
                "阶段排产"
            );

            cursor += length;
            stage += 1;
        }
    }

    /// 游标耗尽后剩余的目录内、非零配额
    fn exhausted_gaps(
        workshop: &Workshop,
        catalog: &MaterialCatalog,
        from_material_idx: usize,
    ) -> Vec<CoverageGap> {
        workshop
            .quotas
            .iter()
            .skip(from_material_idx)
            .filter(|(material, quota)| *quota > 0 && catalog.contains(material))
            .map(|(material, quota)| CoverageGap {
                workshop_id: workshop.workshop_id.clone(),
                material: material.to_string(),
                quota,
                kind: CoverageGapKind::SliceExhausted,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::CalendarDay;
    use crate::domain::workshop::QuotaMap;
    use chrono::NaiveDate;

    fn today() -> CalendarDay {
        CalendarDay::new(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap())
    }

    /// 从明天开始的 n 天窗口
    fn window_after_today(n: usize) -> DayWindow<CalendarDay> {
        let t = today();
        DayWindow::from_days(t, (1..=n as i64).map(|i| t.add(i)).collect())
    }

    fn workshop(id: &str, quotas: &[(&str, u64)]) -> Workshop {
        Workshop::new(
            id,
            format!("manager-{}", id),
            "0912",
            quotas.iter().map(|(m, q)| (*m, *q)).collect::<QuotaMap>(),
        )
    }

    #[test]
    fn test_anchor_skips_today_and_past() {
        let window = DayWindow::centered(today(), 10);
        let idx = DistributionGenerator::anchor_index(&window).unwrap();
        assert_eq!(window.days()[idx].canonical(), "2026-01-21");
    }

    #[test]
    fn test_no_future_day_returns_empty() {
        let t = today();
        let window = DayWindow::from_days(t, (0..10).map(|i| t.add(-i)).rev().collect());
        let generator = DistributionGenerator::default();
        let result = generator.generate(
            &[workshop("W1", &[("A", 100)])],
            &MaterialCatalog::new(["A"]),
            &window,
            &DecisionSource::seeded(1),
        );
        assert!(result.entries.is_empty());
        assert!(result.anchor_date.is_none());
        assert!(!result.has_coverage_gaps());
    }

    #[test]
    fn test_single_material_burst() {
        let generator = DistributionGenerator::default();
        let window = window_after_today(10);
        for seed in 0..50 {
            let result = generator.generate(
                &[workshop("W1", &[("A", 100)])],
                &MaterialCatalog::new(["A"]),
                &window,
                &DecisionSource::seeded(seed),
            );
            let n = result.entries.len();
            assert!((2..=4).contains(&n));
            let first_four: Vec<String> =
                window.days()[..4].iter().map(DayToken::canonical).collect();
            assert!(result.entries.iter().all(|e| first_four.contains(&e.date().to_string())));
            assert_eq!(result.entries.iter().map(|e| e.amount()).sum::<u64>(), 100);
            let prior: u64 = result.entries[..n - 1].iter().map(|e| e.amount()).sum();
            assert_eq!(result.entries[n - 1].amount(), 100 - prior);
        }
    }

    #[test]
    fn test_workshop_stagger_offsets_first_burst() {
        let generator = DistributionGenerator::default();
        let window = window_after_today(20);
        let workshops = vec![
            workshop("W1", &[("A", 50)]),
            workshop("W2", &[("A", 50)]),
            workshop("W3", &[("A", 50)]),
        ];
        let result = generator.generate(
            &workshops,
            &MaterialCatalog::new(["A"]),
            &window,
            &DecisionSource::seeded(9),
        );
        for (idx, id) in ["W1", "W2", "W3"].iter().enumerate() {
            let first = result
                .entries
                .iter()
                .filter(|e| e.workshop_id() == *id)
                .map(|e| e.date().to_string())
                .min()
                .unwrap();
            assert_eq!(first, window.days()[idx].canonical());
        }
    }

    #[test]
    fn test_exhaustion_reports_coverage_gap() {
        // 3 天切片：第一种物资至少 2 天，最多 3 天；第三种物资必然排不下
        let generator = DistributionGenerator::new(3, BurstPolicy::default());
        let window = window_after_today(10);
        let result = generator.generate(
            &[workshop("W1", &[("A", 10), ("B", 10), ("C", 10)])],
            &MaterialCatalog::new(["A", "B", "C"]),
            &window,
            &DecisionSource::seeded(5),
        );
        assert!(result.has_coverage_gaps());
        assert!(result
            .coverage_gaps
            .iter()
            .all(|g| g.kind == CoverageGapKind::SliceExhausted));
        let gap_materials: Vec<&str> =
            result.coverage_gaps.iter().map(|g| g.material.as_str()).collect();
        assert!(gap_materials.contains(&"C"));
        let scheduled: u64 = result.entries.iter().map(|e| e.amount()).sum();
        let unscheduled: u64 = result.coverage_gaps.iter().map(|g| g.quota).sum();
        assert_eq!(scheduled + unscheduled, 30);
    }

    #[test]
    fn test_empty_burst_reported_as_gap() {
        let generator = DistributionGenerator::new(45, BurstPolicy::new(0, 0, 0.15));
        let result = generator.generate(
            &[workshop("W1", &[("A", 10)])],
            &MaterialCatalog::new(["A"]),
            &window_after_today(10),
            &DecisionSource::seeded(5),
        );
        assert!(result.entries.is_empty());
        assert_eq!(result.coverage_gaps.len(), 1);
        assert_eq!(result.coverage_gaps[0].kind, CoverageGapKind::EmptyBurst);
    }

    #[test]
    fn test_empty_burst_does_not_advance_stage() {
        // 长度在 {0, 1} 中抽取：A 为空突发时 B 仍是阶段 1，且从首日开始
        let generator = DistributionGenerator::new(45, BurstPolicy::new(0, 1, 0.0));
        let mut observed = false;

        for seed in 0..64u64 {
            let result = generator.generate(
                &[workshop("W1", &[("A", 10), ("B", 10)])],
                &MaterialCatalog::new(["A", "B"]),
                &window_after_today(10),
                &DecisionSource::seeded(seed),
            );
            let a_empty = result
                .coverage_gaps
                .iter()
                .any(|g| g.material == "A" && g.kind == CoverageGapKind::EmptyBurst);
            let b_entry = result.entries.iter().find(|e| e.material() == "B");

            if let (true, Some(b)) = (a_empty, b_entry) {
                assert_eq!(b.stage(), 1, "seed {}", seed);
                assert_eq!(b.date(), "2026-01-21", "seed {}", seed);
                observed = true;
            }
        }
        assert!(observed);
    }

    #[test]
    fn test_zero_quota_skipped_without_stage() {
        let generator = DistributionGenerator::default();
        let result = generator.generate(
            &[workshop("W1", &[("A", 0), ("B", 20)])],
            &MaterialCatalog::new(["A", "B"]),
            &window_after_today(10),
            &DecisionSource::seeded(5),
        );
        assert!(result.entries.iter().all(|e| e.material() == "B"));
        assert!(result.entries.iter().all(|e| e.stage() == 1));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = DistributionGenerator::default();
        let window = window_after_today(45);
        let workshops = vec![
            workshop("W1", &[("A", 100), ("B", 37)]),
            workshop("W2", &[("B", 12), ("A", 8)]),
        ];
        let catalog = MaterialCatalog::new(["A", "B"]);
        let a = generator.generate(&workshops, &catalog, &window, &DecisionSource::seeded(77));
        let b = generator.generate(&workshops, &catalog, &window, &DecisionSource::seeded(77));
        assert_eq!(a.entries, b.entries);
        assert_eq!(a.seed, 77);
    }
}
