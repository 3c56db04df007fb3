// ==========================================
// 库存盘点系统 - 报表层
// ==========================================
// 流程: 矩阵 → ReportSheet（版式） → .xlsx
// ==========================================

pub mod layout;
pub mod renderer;
pub mod xlsx_writer;

pub use layout::{
    BorderWeight, Borders, CellStyle, HAlign, MergedBlock, ReportCell, ReportSheet, ReportValue,
};
pub use renderer::{
    format_report_date, parse_report_date, tier_for, QuantityTier, ReportRenderer, QUANTITY_TIERS,
};
pub use xlsx_writer::XlsxReportWriter;
