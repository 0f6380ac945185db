// ==========================================
// 车间物资配送排期系统 - 命令行参数定义
// ==========================================
// 子命令: generate（生成计划） / report（按日期选择聚合）
// ==========================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use workshop_distribution::GroupingView;

/// 车间物资配送排期命令行
#[derive(Parser)]
#[command(
    name = "workshop-distribution",
    version,
    about = "车间物资分阶段配送排期"
)]
pub struct Cli {
    /// 提高日志级别（-v debug, -vv trace）
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON 配置文件路径（默认取用户配置目录）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// 生成配送计划并以 JSON 输出
    Generate(GenerateArgs),
    /// 生成后按所选日期聚合（按日或按车间）
    Report(ReportArgs),
}

/// 生成与报告共用的参数
#[derive(Args)]
pub struct ScheduleArgs {
    /// 车间名册（.json / .csv / .xlsx / .xls）
    #[arg(short, long)]
    pub roster: PathBuf,

    /// 今天的日期（YYYY-MM-DD），默认取本地日期
    #[arg(long)]
    pub today: Option<String>,

    /// 覆写配置中的随机种子
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// 覆写覆盖天数
    #[arg(long = "coverage-days")]
    pub coverage_days: Option<usize>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// 选择起始日（YYYY-MM-DD）
    #[arg(long)]
    pub from: String,

    /// 选择结束日（含），省略时为单日
    #[arg(long)]
    pub to: Option<String>,

    /// 输出分组: day / workshop
    #[arg(long, default_value_t = GroupingView::Day)]
    pub view: GroupingView,
}
