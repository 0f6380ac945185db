// ==========================================
// 车间物资配送排期系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、命令行覆写
// 存储: JSON 文件（显式路径 > 用户配置目录 > 内置默认值）
// ==========================================

use crate::config::distribution_config::DistributionConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 用户配置目录下的子目录名
pub const CONFIG_DIR_NAME: &str = "workshop-distribution";
/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值错误 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug)]
pub struct ConfigManager {
    config: DistributionConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 从内置默认值创建
    pub fn with_defaults() -> Self {
        Self {
            config: DistributionConfig::default(),
            source: None,
        }
    }

    /// 从指定文件加载并校验
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: DistributionConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        validate(&config)?;

        info!(path = %path.display(), "已加载配置文件");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit: 命令行指定的路径（存在即必须可读）
    ///
    /// # 说明
    /// 未指定时尝试 `<config_dir>/workshop-distribution/config.json`，
    /// 不存在则使用默认值。
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 命令行覆写 seed
    pub fn override_seed(&mut self, seed: Option<u64>) {
        if seed.is_some() {
            self.config.seed = seed;
        }
    }

    /// 命令行覆写覆盖天数
    pub fn override_coverage_days(&mut self, coverage_days: Option<usize>) -> ConfigResult<()> {
        if let Some(days) = coverage_days {
            let mut candidate = self.config.clone();
            candidate.coverage_days = days;
            validate(&candidate)?;
            self.config = candidate;
        }
        Ok(())
    }

    pub fn into_config(self) -> DistributionConfig {
        self.config
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// 校验配置
pub fn validate(config: &DistributionConfig) -> ConfigResult<()> {
    if config.coverage_days == 0 {
        return Err(invalid("coverage_days", "必须大于 0"));
    }
    if config.window_days == 0 {
        return Err(invalid("window_days", "必须大于 0"));
    }
    if config.burst_min_days == 0 {
        return Err(invalid("burst_min_days", "必须大于 0"));
    }
    if config.burst_min_days > config.burst_max_days {
        return Err(invalid(
            "burst_max_days",
            &format!(
                "不能小于 burst_min_days ({} > {})",
                config.burst_min_days, config.burst_max_days
            ),
        ));
    }
    if !(0.0..1.0).contains(&config.jitter_ratio) {
        return Err(invalid("jitter_ratio", "必须在 [0, 1) 区间内"));
    }

    let mut seen = HashSet::new();
    for material in &config.material_catalog {
        if material.trim().is_empty() {
            return Err(invalid("material_catalog", "物资标识不能为空"));
        }
        if !seen.insert(material.as_str()) {
            return Err(invalid("material_catalog", &format!("重复物资: {}", material)));
        }
    }
    Ok(())
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
