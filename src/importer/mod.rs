// ==========================================
// 车间物资配送排期系统 - 导入层
// ==========================================
// 职责: 车间名册 (JSON/CSV/Excel) → 清洗后的 Workshop 列表
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod roster_importer;
pub mod roster_importer_trait;

pub use data_cleaner::{DroppedQuota, RosterCleaner};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvRosterParser, ExcelRosterParser, JsonRosterParser, UniversalRosterParser};
pub use roster_importer::{RosterImport, RosterImporter};
pub use roster_importer_trait::{RawQuota, RawWorkshopRecord, RosterParser};
