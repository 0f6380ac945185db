// ==========================================
// 车间物资配送排期系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入/配置错误为用户可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::domain::selection::SelectionError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("日期不在窗口内: {date}（窗口 {first} ~ {last}）")]
    DayOutsideWindow {
        date: String,
        first: String,
        last: String,
    },

    #[error("日期选择无效: {0}")]
    InvalidSelection(#[from] SelectionError),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("名册导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
