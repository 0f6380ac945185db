// ==========================================
// 车间物资配送排期系统 - 配送计划 API
// ==========================================
// 职责: 组装日期窗口 → 生成配送计划 → 按选择聚合
// 日期窗口每个会话构造一次，显式传给生成与选择
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::DistributionConfig;
use crate::domain::calendar::{CalendarDay, DayToken, DayWindow};
use crate::domain::selection::DaySelection;
use crate::domain::types::CoverageGap;
use crate::domain::workshop::Workshop;
use crate::engine::{AggregatedView, Aggregator, DecisionSource, DistributionResult};
use crate::importer::{RosterImport, RosterImporter};
use crate::perf::PerfGuard;
use serde::Serialize;
use std::path::Path;

/// 聚合报告（供展示层）
#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub anchor_date: Option<String>,
    pub seed: u64,
    pub coverage_gaps: Vec<CoverageGap>,
    #[serde(flatten)]
    pub view: AggregatedView,
}

pub struct DistributionApi {
    config: DistributionConfig,
}

impl DistributionApi {
    pub fn new(config: DistributionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    /// 导入车间名册
    pub fn import_roster(&self, path: &Path) -> ApiResult<RosterImport> {
        let _perf = PerfGuard::new("import_roster");
        Ok(RosterImporter::new().import(path)?)
    }

    /// 以 today 为中心构造日期窗口
    pub fn build_window(&self, today: CalendarDay) -> DayWindow<CalendarDay> {
        DayWindow::centered(today, self.config.window_days)
    }

    /// 生成配送计划
    pub fn generate(
        &self,
        workshops: &[Workshop],
        window: &DayWindow<CalendarDay>,
    ) -> DistributionResult {
        let _perf = PerfGuard::new("generate_distribution");
        let source = DecisionSource::new(self.config.seed);
        self.config
            .generator()
            .generate(workshops, &self.config.catalog(), window, &source)
    }

    /// 解析窗口内的日期
    pub fn resolve_day(
        &self,
        window: &DayWindow<CalendarDay>,
        value: &str,
    ) -> ApiResult<CalendarDay> {
        let day = CalendarDay::parse(value).ok_or_else(|| {
            ApiError::InvalidInput(format!("日期格式错误: {}（期望 YYYY-MM-DD）", value))
        })?;

        match window.find(&day.canonical()) {
            Some(found) => Ok(*found),
            None => Err(ApiError::DayOutsideWindow {
                date: day.canonical(),
                first: window.days().first().map(DayToken::canonical).unwrap_or_default(),
                last: window.days().last().map(DayToken::canonical).unwrap_or_default(),
            }),
        }
    }

    /// 构造日期选择（to 省略时为单日）
    pub fn select_days(
        &self,
        window: &DayWindow<CalendarDay>,
        from: &str,
        to: Option<&str>,
    ) -> ApiResult<DaySelection<CalendarDay>> {
        let from = self.resolve_day(window, from)?;
        match to {
            None => Ok(DaySelection::Single(from)),
            Some(to) => {
                let to = self.resolve_day(window, to)?;
                Ok(DaySelection::range(from, to)?)
            }
        }
    }

    /// 按选择聚合
    pub fn report(
        &self,
        result: &DistributionResult,
        selection: &DaySelection<CalendarDay>,
    ) -> DistributionReport {
        let _perf = PerfGuard::new("aggregate_distribution");
        DistributionReport {
            anchor_date: result.anchor_date.clone(),
            seed: result.seed,
            coverage_gaps: result.coverage_gaps.clone(),
            view: Aggregator::aggregate(&result.entries, selection),
        }
    }
}
