// ==========================================
// 车间物资配送排期系统 - 命令行入口
// ==========================================
// 流程: 加载配置 → 导入名册 → 构造日期窗口 → 生成 → 输出 JSON
// 日志写 stderr，计划写 stdout
// ==========================================

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};

use cli::{Cli, Command, ScheduleArgs};
use workshop_distribution::config::ConfigManager;
use workshop_distribution::{
    logging, CalendarDay, DayWindow, DistributionApi, DistributionResult, GroupingView,
};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => {
            let session = Session::prepare(cli.config.as_deref(), &args.schedule)?;
            let output = json!({
                "anchor_date": session.result.anchor_date,
                "seed": session.result.seed,
                "valid_days": session.result.valid_days,
                "entries": session.result.entries,
                "coverage_gaps": session.result.coverage_gaps,
                "dropped_quotas": session.dropped_quotas,
            });
            print_json(&output)
        }
        Command::Report(args) => {
            let session = Session::prepare(cli.config.as_deref(), &args.schedule)?;
            let selection = session
                .api
                .select_days(&session.window, &args.from, args.to.as_deref())
                .context("日期选择无效")?;
            let report = session.api.report(&session.result, &selection);

            let grouped = match args.view {
                GroupingView::Day => json!({ "by_day": report.view.by_day }),
                GroupingView::Workshop => json!({ "by_workshop": report.view.by_workshop }),
            };
            let output = json!({
                "anchor_date": report.anchor_date,
                "seed": report.seed,
                "view": args.view,
                "selected_days": report.view.selected_days,
                "summary": report.view.summary,
                "coverage_gaps": report.coverage_gaps,
                "groups": grouped,
            });
            print_json(&output)
        }
    }
}

/// 一次命令执行的上下文：配置、窗口与生成结果
struct Session {
    api: DistributionApi,
    window: DayWindow<CalendarDay>,
    result: DistributionResult,
    dropped_quotas: Vec<workshop_distribution::importer::DroppedQuota>,
}

impl Session {
    fn prepare(config_path: Option<&std::path::Path>, args: &ScheduleArgs) -> Result<Self> {
        let mut manager = ConfigManager::load(config_path).context("加载配置失败")?;
        manager.override_seed(args.seed);
        manager
            .override_coverage_days(args.coverage_days)
            .context("--coverage-days 无效")?;
        if let Some(source) = manager.source() {
            info!(config = %source.display(), "使用配置文件");
        }

        let api = DistributionApi::new(manager.into_config());

        let today = match args.today.as_deref() {
            Some(value) => CalendarDay::parse(value)
                .with_context(|| format!("--today 格式错误: {}（期望 YYYY-MM-DD）", value))?,
            None => CalendarDay::new(chrono::Local::now().date_naive()),
        };
        let window = api.build_window(today);

        let import = api
            .import_roster(&args.roster)
            .with_context(|| format!("导入车间名册失败: {}", args.roster.display()))?;
        if !import.dropped_quotas.is_empty() {
            warn!(dropped = import.dropped_quotas.len(), "部分配额值已被丢弃");
        }

        let result = api.generate(&import.workshops, &window);
        info!(
            entries = result.entries.len(),
            gaps = result.coverage_gaps.len(),
            seed = result.seed,
            "配送计划生成完成"
        );

        Ok(Self {
            api,
            window,
            result,
            dropped_quotas: import.dropped_quotas,
        })
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("序列化输出失败")?;
    println!("{}", text);
    Ok(())
}
