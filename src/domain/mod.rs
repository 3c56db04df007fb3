// ==========================================
// 库存盘点系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod stock;
pub mod types;
pub mod worksheet;

// 重导出核心类型
pub use stock::{
    IngestError, IngestOutcome, MatrixRow, ParseFailure, PipelineStats, ProductCode,
    QuantityWarning, ReconciliationResult, SourceRow, StockMatrix,
};
pub use types::{IngestErrorReason, ParseFailureReason, Size};
pub use worksheet::{CellValue, Worksheet};
