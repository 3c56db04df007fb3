// ==========================================
// 库存盘点系统 - 引擎层
// ==========================================
// 职责: 矩阵汇总 / 守恒校验 / 流水线编排 / 视图过滤
// 红线: 纯函数,不做文件 I/O（文件读取经 SheetReader 注入）
// ==========================================

pub mod matrix_aggregator;
pub mod pipeline;
pub mod reconciler;
pub mod view_filter;

// 重导出核心引擎
pub use matrix_aggregator::MatrixAggregator;
pub use pipeline::{collect_stats, PipelineOutcome, PipelineRun, SourceInput};
pub use reconciler::Reconciler;
pub use view_filter::MatrixFilter;
