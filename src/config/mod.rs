// ==========================================
// 车间物资配送排期系统 - 配置层
// ==========================================
// 职责: 排期参数与物资目录的加载、校验、覆写
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod distribution_config;

// 重导出核心配置管理器
pub use config_manager::{default_config_path, validate, ConfigError, ConfigManager, ConfigResult};
pub use distribution_config::DistributionConfig;
