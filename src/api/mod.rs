// ==========================================
// 车间物资配送排期系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行/展示层调用
// ==========================================

pub mod distribution_api;
pub mod error;

// 重导出核心类型
pub use distribution_api::{DistributionApi, DistributionReport};
pub use error::{ApiError, ApiResult};
