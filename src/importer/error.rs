// ==========================================
// 库存盘点系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 仅 I/O 协作层（读文件/写报表/读配置）
// 核心流水线不返回 Err,失败均以数据形式记录
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm/.xls/.xlsb/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 输出相关错误 =====
    #[error("报表写入失败: {0}")]
    ReportWriteError(String),

    #[error("错误报告导出失败: {0}")]
    ErrorReportError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 (path: {path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置格式错误 (path: {path}): {message}")]
    ConfigParseError { path: String, message: String },

    // ===== 参数错误 =====
    #[error("日期格式错误: 期望 YYYY-MM-DD，实际 {0}")]
    DateFormatError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ImportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ImportError::ReportWriteError(err.to_string())
    }
}

// 实现 From<serde_json::Error>（内联配置文本,无路径）
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::ConfigParseError {
            path: "<inline>".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_file_read_error() {
        let err: ImportError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, ImportError::FileReadError(msg) if msg.contains("boom")));
    }

    #[test]
    fn test_error_messages() {
        let err = ImportError::UnsupportedFormat("pdf".to_string());
        assert!(err.to_string().contains("pdf"));

        let err = ImportError::DateFormatError("2025/01/20".to_string());
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
