// ==========================================
// 库存盘点系统 - 错误报告导出
// ==========================================
// 格式: file,sku,reason（表头不加引号,数据值一律加双引号,内嵌引号加倍）
// 命名: errors_YYYYMMDD.csv / <标题>_YYYYMMDD.xlsx
// ==========================================

use crate::domain::stock::IngestError;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::Path;
use tracing::info;

/// CSV 表头
const ERROR_CSV_HEADER: &str = "file,sku,reason";

pub struct ErrorReport;

impl ErrorReport {
    /// 错误列表 → CSV 文本
    pub fn to_csv(errors: &[IngestError]) -> ImportResult<String> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        for error in errors {
            writer.write_record([error.file.as_str(), error.sku.as_str(), error.reason.as_str()])?;
        }

        let body = writer
            .into_inner()
            .map_err(|e| ImportError::ErrorReportError(e.to_string()))?;
        let body =
            String::from_utf8(body).map_err(|e| ImportError::ErrorReportError(e.to_string()))?;

        Ok(format!("{}\n{}", ERROR_CSV_HEADER, body))
    }

    /// 写入错误报告文件
    pub fn write_to(path: &Path, errors: &[IngestError]) -> ImportResult<()> {
        let content = Self::to_csv(errors)?;
        std::fs::write(path, content)
            .map_err(|e| ImportError::ErrorReportError(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), errors = errors.len(), "错误报告已写入");
        Ok(())
    }
}

/// 报表文件名: <标题>_YYYYMMDD.xlsx
pub fn report_file_name(title: &str, report_date: NaiveDate) -> String {
    format!("{}_{}.xlsx", title, report_date.format("%Y%m%d"))
}

/// 错误报告文件名: errors_YYYYMMDD.csv
pub fn error_file_name(report_date: NaiveDate) -> String {
    format!("errors_{}.csv", report_date.format("%Y%m%d"))
}
