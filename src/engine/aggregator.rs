// ==========================================
// 车间物资配送排期系统 - 配送聚合引擎
// ==========================================
// 职责: 配送条目 + 日期选择 → 按日分组 / 按车间-阶段分组 / 汇总
// 红线: 只依赖两个输入，无全局状态，不缓存，每次从头折叠
// ==========================================

use crate::domain::calendar::DayToken;
use crate::domain::delivery::DeliveryEntry;
use crate::domain::selection::DaySelection;
use serde::Serialize;
use tracing::{debug, instrument};

// ==========================================
// 视图结构
// ==========================================

/// 按日分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub date: String,
    pub total: u64,
    pub entries: Vec<DeliveryEntry>,
}

/// 车间内某阶段（可跨多天）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageGroup {
    pub stage: u32,
    pub total: u64,
    pub entries: Vec<DeliveryEntry>,
}

/// 按车间分组（内含阶段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkshopGroup {
    #[serde(rename = "workshop")]
    pub workshop_id: String,
    pub manager: String,
    pub phone: String,
    pub total: u64,
    pub stages: Vec<StageGroup>,
}

/// 单物资小计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialTotal {
    pub material: String,
    pub total: u64,
}

/// 汇总
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DistributionSummary {
    pub total: u64,
    pub by_material: Vec<MaterialTotal>, // 按首次出现顺序
}

impl DistributionSummary {
    pub fn subtotal(&self, material: &str) -> Option<u64> {
        self.by_material
            .iter()
            .find(|m| m.material == material)
            .map(|m| m.total)
    }
}

/// 聚合结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedView {
    pub selected_days: Vec<String>,
    pub summary: DistributionSummary,
    pub by_day: Vec<DayGroup>,
    pub by_workshop: Vec<WorkshopGroup>,
}

impl AggregatedView {
    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }
}

// ==========================================
// Aggregator - 聚合引擎（无状态）
// ==========================================
pub struct Aggregator;

impl Aggregator {
    /// 按选中日期过滤（规范日期字符串精确相等）
    pub fn filter(entries: &[DeliveryEntry], selected_days: &[String]) -> Vec<DeliveryEntry> {
        entries
            .iter()
            .filter(|e| selected_days.iter().any(|d| d == e.date()))
            .cloned()
            .collect()
    }

    /// 按日分组：分组顺序 = 首次出现顺序
    pub fn group_by_day(entries: &[DeliveryEntry]) -> Vec<DayGroup> {
        entries.iter().fold(Vec::new(), |mut groups: Vec<DayGroup>, entry| {
            match groups.iter_mut().find(|g| g.date == entry.date()) {
                Some(group) => {
                    group.total = group.total.saturating_add(entry.amount());
                    group.entries.push(entry.clone());
                }
                None => groups.push(DayGroup {
                    date: entry.date().to_string(),
                    total: entry.amount(),
                    entries: vec![entry.clone()],
                }),
            }
            groups
        })
    }

    /// 按车间分组，再按阶段分组
    ///
    /// 车间顺序 = 首次出现顺序；阶段升序；同一 (车间, 阶段) 的条目
    /// 不论日期直接拼接。
    pub fn group_by_workshop_stage(entries: &[DeliveryEntry]) -> Vec<WorkshopGroup> {
        let mut groups = entries
            .iter()
            .fold(Vec::new(), |mut groups: Vec<WorkshopGroup>, entry| {
                let idx = match groups.iter().position(|g| g.workshop_id == entry.workshop_id()) {
                    Some(idx) => idx,
                    None => {
                        groups.push(WorkshopGroup {
                            workshop_id: entry.workshop_id().to_string(),
                            manager: entry.manager().to_string(),
                            phone: entry.phone().to_string(),
                            total: 0,
                            stages: Vec::new(),
                        });
                        groups.len() - 1
                    }
                };

                let group = &mut groups[idx];
                group.total = group.total.saturating_add(entry.amount());
                match group.stages.iter_mut().find(|s| s.stage == entry.stage()) {
                    Some(stage) => {
                        stage.total = stage.total.saturating_add(entry.amount());
                        stage.entries.push(entry.clone());
                    }
                    None => group.stages.push(StageGroup {
                        stage: entry.stage(),
                        total: entry.amount(),
                        entries: vec![entry.clone()],
                    }),
                }
                groups
            });

        for group in &mut groups {
            group.stages.sort_by_key(|s| s.stage);
        }
        groups
    }

    /// 汇总：总量 + 物资小计
    ///
    /// 所有合计饱和累加，超过 u64::MAX 时停在上限。
    pub fn summarize(entries: &[DeliveryEntry]) -> DistributionSummary {
        entries
            .iter()
            .fold(DistributionSummary::default(), |mut summary, entry| {
                summary.total = summary.total.saturating_add(entry.amount());
                match summary
                    .by_material
                    .iter_mut()
                    .find(|m| m.material == entry.material())
                {
                    Some(m) => m.total = m.total.saturating_add(entry.amount()),
                    None => summary.by_material.push(MaterialTotal {
                        material: entry.material().to_string(),
                        total: entry.amount(),
                    }),
                }
                summary
            })
    }

    /// 完整聚合
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub fn aggregate<D: DayToken>(
        entries: &[DeliveryEntry],
        selection: &DaySelection<D>,
    ) -> AggregatedView {
        let selected_days = selection.canonical_days();
        let matched = Self::filter(entries, &selected_days);

        let view = AggregatedView {
            summary: Self::summarize(&matched),
            by_day: Self::group_by_day(&matched),
            by_workshop: Self::group_by_workshop_stage(&matched),
            selected_days,
        };

        debug!(
            selected_days = view.selected_days.len(),
            matched = matched.len(),
            total_t = view.summary.total,
            "聚合完成"
        );
        view
    }
}
