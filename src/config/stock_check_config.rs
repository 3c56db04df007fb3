// ==========================================
// 库存盘点系统 - 配置项定义
// ==========================================
// 职责: 列识别规则 + 报表文案,全部带默认值
// 格式: JSON（缺失字段回退默认值）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// StockCheckConfig - 总配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockCheckConfig {
    pub columns: ColumnRules,
    pub report: ReportLabels,
}

// ==========================================
// ColumnRules - 列识别规则
// ==========================================
// 列号均为 1 起（B = 2, I = 9）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRules {
    /// 表头探测的最大行数
    pub header_scan_rows: usize,
    /// 表头行至少需要的非空单元格数
    pub header_min_cells: usize,
    /// SKU 列回退位置
    pub code_fallback_column: usize,
    /// 可售库存列回退位置
    pub quantity_fallback_column: usize,
    /// SKU 列标记（大小写不敏感）
    pub code_token: String,
    /// 本地化的“库存 SKU”复合标签
    pub code_compound_label: String,
    /// 本地化的“可售库存”短语（精确短语在前）
    pub quantity_phrases: Vec<String>,
    /// 英文数量标记（大小写不敏感）
    pub quantity_tokens: Vec<String>,
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self {
            header_scan_rows: 10,
            header_min_cells: 5,
            code_fallback_column: 2,
            quantity_fallback_column: 9,
            code_token: "SKU".to_string(),
            code_compound_label: "สินค้าคงคลัง".to_string(),
            quantity_phrases: vec!["สต็อกพร้อมขาย".to_string(), "พร้อมขาย".to_string()],
            quantity_tokens: vec!["AVAILABLE".to_string(), "READY".to_string()],
        }
    }
}

// ==========================================
// ReportLabels - 报表文案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    /// 工作表名兼标题（也用作导出文件名前缀）
    pub title: String,
    pub date_label: String,
    pub model_label: String,
    pub color_label: String,
    /// 工作簿作者属性
    pub author: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            title: "ใบเช็คสต็อก".to_string(),
            date_label: "วันที่อัปเดต".to_string(),
            model_label: "รุ่น".to_string(),
            color_label: "สี".to_string(),
            author: "ERP Stock Checker".to_string(),
        }
    }
}
