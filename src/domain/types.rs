// ==========================================
// 车间物资配送排期系统 - 领域类型定义
// ==========================================
// 覆盖缺口 (coverage gap) 与视图类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 覆盖缺口类型 (Coverage Gap Kind)
// ==========================================
// 本轮未排产的配额；不是调用方错误，不自动补偿
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageGapKind {
    SliceExhausted, // 游标已越过有效窗口末尾
    EmptyBurst,     // 裁剪后突发长度为 0
}

impl fmt::Display for CoverageGapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageGapKind::SliceExhausted => write!(f, "SLICE_EXHAUSTED"),
            CoverageGapKind::EmptyBurst => write!(f, "EMPTY_BURST"),
        }
    }
}

// ==========================================
// CoverageGap - 覆盖缺口
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    pub workshop_id: String,
    pub material: String,
    pub quota: u64,            // 未排产配额（吨）
    pub kind: CoverageGapKind,
}

// ==========================================
// 分组视图 (Grouping View)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingView {
    #[default]
    Day,      // 按日
    Workshop, // 按车间/阶段
}

impl fmt::Display for GroupingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingView::Day => write!(f, "day"),
            GroupingView::Workshop => write!(f, "workshop"),
        }
    }
}

impl FromStr for GroupingView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(GroupingView::Day),
            "workshop" => Ok(GroupingView::Workshop),
            other => Err(format!("未知视图: {}（可选 day / workshop）", other)),
        }
    }
}
