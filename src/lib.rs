// ==========================================
// 车间物资配送排期系统 - 核心库
// ==========================================
// 职责: 车间配额 → 分阶段配送计划 → 按日/按车间聚合
// 技术栈: Rust + serde + tracing
// 系统定位: 纯计算库 (不持久化计划)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 计划生成与聚合
pub mod engine;

// 导入层 - 车间名册
pub mod importer;

// 配置层 - 排期参数
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CoverageGap, CoverageGapKind, GroupingView};

// 领域实体
pub use domain::{
    CalendarDay, DayToken, DayWindow, DaySelection, DeliveryEntry, MaterialCatalog, QuotaMap,
    Workshop,
};

// 引擎
pub use engine::{
    AggregatedView, Aggregator, BurstPolicy, DecisionSource, DistributionGenerator,
    DistributionResult,
};

// 配置
pub use config::{ConfigManager, DistributionConfig};

// API
pub use api::{ApiError, DistributionApi, DistributionReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车间物资配送排期系统";
