// ==========================================
// 库存盘点系统 - 导入层
// ==========================================
// 流程: 读取工作表 → 列定位 → SKU 解析 → 行导入
// 支持: Excel (xlsx/xlsm/xls/xlsb/ods), CSV
// ==========================================

// 模块声明
pub mod code_parser;
pub mod column_locator;
pub mod error;
pub mod error_report;
pub mod file_parser;
pub mod row_ingester;
pub mod sheet_reader_trait;

// 重导出核心类型
pub use code_parser::CodeParser;
pub use column_locator::{ColumnLayout, ColumnLocator};
pub use error::{ImportError, ImportResult};
pub use error_report::{error_file_name, report_file_name, ErrorReport};
pub use file_parser::{CsvSheetReader, ExcelSheetReader, UniversalSheetReader};
pub use row_ingester::{coerce_quantity, QuantityCoercion, RowIngester, SourceSheet};

// 重导出 Trait 接口
pub use sheet_reader_trait::SheetReader;
