// ==========================================
// 库存盘点系统 - 库存领域模型
// ==========================================
// 职责: SKU 解析结果 / 导入行 / 尺码矩阵 / 校验结果
// 生命周期: 仅在一次流水线运行内
// ==========================================

use crate::domain::types::{IngestErrorReason, ParseFailureReason, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// ProductCode - SKU 解析结果
// ==========================================
// 不变量: raw ≈ model + "-" + color + size（去空白后语义等价）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCode {
    pub model: String,
    pub color: String,
    pub size: Size,
    pub raw: String, // 去空白后的原始 SKU
}

// ==========================================
// ParseFailure - SKU 解析失败
// ==========================================
// 终态: 不重试
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub raw: String,
    pub reason: ParseFailureReason,
}

// ==========================================
// SourceRow - 已校验的库存行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    pub source_file: String,
    pub code: ProductCode,
    pub quantity: i64, // 已截断为整数
}

impl SourceRow {
    pub fn model(&self) -> &str {
        &self.code.model
    }

    pub fn color(&self) -> &str {
        &self.code.color
    }

    pub fn size(&self) -> Size {
        self.code.size
    }
}

// ==========================================
// IngestError - 导入错误（带上下文）
// ==========================================
// 用途: CSV 错误报告一行 = 一条 IngestError
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestError {
    pub file: String,
    pub sku: String, // 文件级错误为空串
    pub reason: IngestErrorReason,
}

impl IngestError {
    pub fn file_level(file: impl Into<String>, reason: IngestErrorReason) -> Self {
        Self {
            file: file.into(),
            sku: String::new(),
            reason,
        }
    }

    pub fn from_failure(file: impl Into<String>, failure: ParseFailure) -> Self {
        Self {
            file: file.into(),
            sku: failure.raw,
            reason: IngestErrorReason::Parse(failure.reason),
        }
    }
}

// ==========================================
// QuantityWarning - 数量无法识别（已按 0 计）
// ==========================================
// 与真实的 0 库存区分；不计入错误数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityWarning {
    pub file: String,
    pub sku: String,
    pub raw: String, // 原始数量单元格文本
}

// ==========================================
// IngestOutcome - 行导入结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestOutcome {
    pub rows: Vec<SourceRow>,
    pub errors: Vec<IngestError>,
    pub warnings: Vec<QuantityWarning>,
}

// ==========================================
// MatrixRow - 尺码矩阵行
// ==========================================
// 键: (model, color)；每个尺码一个数量,缺失为 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub model: String,
    pub color: String,
    pub quantities: [i64; 7], // 下标 = Size::index()
}

impl MatrixRow {
    pub fn new(model: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            color: color.into(),
            quantities: [0; 7],
        }
    }

    pub fn quantity(&self, size: Size) -> i64 {
        self.quantities[size.index()]
    }

    pub fn add(&mut self, size: Size, quantity: i64) {
        let slot = &mut self.quantities[size.index()];
        *slot = slot.saturating_add(quantity);
    }

    pub fn total(&self) -> i64 {
        self.quantities.iter().fold(0, |acc, q| acc.saturating_add(*q))
    }
}

// ==========================================
// StockMatrix - 汇总后的矩阵
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMatrix {
    pub rows: Vec<MatrixRow>,     // 按 (model, color) 升序
    pub models: BTreeSet<String>, // 出现过的型号（有序）
}

impl StockMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn total(&self) -> i64 {
        self.rows
            .iter()
            .map(MatrixRow::total)
            .fold(0, i64::saturating_add)
    }
}

// ==========================================
// ReconciliationResult - 数量守恒校验结果
// ==========================================
// 派生值,不持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub raw_total: i64,
    pub matrix_total: i64,
    pub diff: i64,
    pub per_file: Vec<(String, i64)>, // 按文件名升序
}

impl ReconciliationResult {
    /// diff == 0 即流水线无损
    pub fn is_balanced(&self) -> bool {
        self.diff == 0
    }
}

// ==========================================
// PipelineStats - 对外暴露的汇总指标
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub uploaded_files: usize,
    pub parsed_rows: usize,
    pub distinct_model_colors: usize,
    pub distinct_skus: usize, // (model, color, size)
    pub error_count: usize,
    pub warning_count: usize,
}
