// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别与输出格式
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 输出格式环境变量（取值 json 时输出结构化 JSON 日志）
pub const LOG_FORMAT_ENV: &str = "WORKSHOP_DIST_LOG_FORMAT";

/// 命令行 -v 次数 → 默认日志级别
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（设置时优先于 -v）
///   例如: RUST_LOG=debug 或 RUST_LOG=workshop_distribution=trace
/// - WORKSHOP_DIST_LOG_FORMAT: `json` 输出 JSON 行，其余取值为文本格式
///
/// 日志写入 stderr，stdout 保留给计划输出
///
/// # 示例
/// ```no_run
/// use workshop_distribution::logging;
/// logging::init(0);
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 重复初始化时忽略（测试/嵌入场景）
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "info");
        assert_eq!(level_for_verbosity(1), "debug");
        assert_eq!(level_for_verbosity(2), "trace");
        assert_eq!(level_for_verbosity(9), "trace");
    }

    #[test]
    fn test_init_test_is_idempotent() {
        init_test();
        init_test();
    }
}
