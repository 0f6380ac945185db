// ==========================================
// 车间物资配送排期系统 - 引擎层
// ==========================================
// 职责: 配送计划生成 + 聚合，均为纯函数
// 红线: 引擎不读文件, 退化情况作为数据返回而非错误
// ==========================================

pub mod aggregator;
pub mod burst;
pub mod distribution;
pub mod random;

// 重导出核心引擎
pub use aggregator::{
    AggregatedView, Aggregator, DayGroup, DistributionSummary, MaterialTotal, StageGroup,
    WorkshopGroup,
};
pub use burst::{BurstPolicy, DEFAULT_BURST_MAX_DAYS, DEFAULT_BURST_MIN_DAYS, DEFAULT_JITTER_RATIO};
pub use distribution::{DistributionGenerator, DistributionResult, DEFAULT_COVERAGE_DAYS};
pub use random::DecisionSource;
