// ==========================================
// 车间物资配送排期系统 - 车间名册导入器
// ==========================================
// 流程: 文件解析 → 清洗 → Workshop 列表 + 丢弃配额报告
// ==========================================

use crate::domain::workshop::Workshop;
use crate::importer::data_cleaner::{DroppedQuota, RosterCleaner};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalRosterParser;
use crate::importer::roster_importer_trait::RosterParser;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

/// 导入结果
#[derive(Debug, Clone, Serialize)]
pub struct RosterImport {
    pub workshops: Vec<Workshop>,
    pub dropped_quotas: Vec<DroppedQuota>,
}

pub struct RosterImporter<P: RosterParser = UniversalRosterParser> {
    parser: P,
    cleaner: RosterCleaner,
}

impl RosterImporter<UniversalRosterParser> {
    pub fn new() -> Self {
        Self::with_parser(UniversalRosterParser)
    }
}

impl Default for RosterImporter<UniversalRosterParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: RosterParser> RosterImporter<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            cleaner: RosterCleaner,
        }
    }

    /// 导入车间名册
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn import(&self, path: &Path) -> ImportResult<RosterImport> {
        let records = self.parser.parse_records(path)?;
        let record_count = records.len();
        let (workshops, dropped_quotas) = self.cleaner.clean_records(records)?;

        info!(
            records = record_count,
            workshops = workshops.len(),
            dropped_quotas = dropped_quotas.len(),
            "车间名册导入完成"
        );

        Ok(RosterImport {
            workshops,
            dropped_quotas,
        })
    }
}
