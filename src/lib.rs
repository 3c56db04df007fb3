// ==========================================
// 库存盘点系统 - 核心库
// ==========================================
// 输入: ERP 库存导出表（xlsx/xls/ods/csv）
// 输出: 尺码矩阵盘点表 (.xlsx) + 错误报告 (.csv)
// 红线: 核心流水线不返回 Err,数量守恒必须可校验
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 文件读取 / 列定位 / SKU 解析
pub mod importer;

// 引擎层 - 汇总 / 校验 / 编排
pub mod engine;

// 报表层 - 版式与 xlsx 输出
pub mod report;

// 配置层 - 列识别规则与报表文案
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{IngestErrorReason, ParseFailureReason, Size};

// 领域实体
pub use domain::{
    CellValue, IngestError, IngestOutcome, MatrixRow, ParseFailure, PipelineStats, ProductCode,
    QuantityWarning, ReconciliationResult, SourceRow, StockMatrix, Worksheet,
};

// 导入
pub use importer::{
    CodeParser, ColumnLayout, ColumnLocator, ErrorReport, ImportError, ImportResult, RowIngester,
    SheetReader, SourceSheet, UniversalSheetReader,
};

// 引擎
pub use engine::{
    MatrixAggregator, MatrixFilter, PipelineOutcome, PipelineRun, Reconciler, SourceInput,
};

// 报表
pub use report::{ReportRenderer, ReportSheet, XlsxReportWriter};

// 配置
pub use config::{ConfigManager, StockCheckConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ERP Stock Checker";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
