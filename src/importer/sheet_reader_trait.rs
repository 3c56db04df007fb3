// ==========================================
// 库存盘点系统 - 工作表读取 Trait
// ==========================================
// 职责: 定义文件 → 工作表网格的读取接口（不包含实现）
// 红线: 只读取第一个工作表,不合并多表
// ==========================================

use crate::domain::worksheet::Worksheet;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// SheetReader Trait
// ==========================================
// 用途: 读取文件第一个工作表
// 实现者: ExcelSheetReader, CsvSheetReader, UniversalSheetReader
pub trait SheetReader: Send + Sync {
    /// 读取第一个工作表
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Some(Worksheet)): 读取成功
    /// - Ok(None): 文件可打开但不含工作表
    /// - Err: 文件不存在、格式不支持、解码失败
    fn read_first_sheet(&self, file_path: &Path) -> ImportResult<Option<Worksheet>>;
}
