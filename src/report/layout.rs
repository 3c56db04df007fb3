// ==========================================
// 库存盘点系统 - 报表版式模型
// ==========================================
// 职责: 描述输出工作表（列宽/合并区/单元格样式）,不依赖具体写入库
// 坐标: 行列均为 0 起（A1 = (0, 0)）
// ==========================================

use serde::Serialize;

/// 边框粗细
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderWeight {
    #[default]
    None,
    Thin,
    Medium,
}

/// 水平对齐（垂直方向统一居中）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Borders {
    pub top: BorderWeight,
    pub bottom: BorderWeight,
    pub left: BorderWeight,
    pub right: BorderWeight,
}

impl Borders {
    pub fn all(weight: BorderWeight) -> Self {
        Self {
            top: weight,
            bottom: weight,
            left: weight,
            right: weight,
        }
    }
}

// ==========================================
// CellStyle - 单元格样式
// ==========================================
// 颜色均为 0xRRGGBB
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: Option<f64>,
    pub font_color: Option<u32>,
    pub fill: Option<u32>, // 实心填充
    pub align: Option<HAlign>,
    pub borders: Borders,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReportValue {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCell {
    pub row: usize,
    pub col: usize,
    pub value: ReportValue,
    pub style: CellStyle,
}

/// 合并区（含首尾行列）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedBlock {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
    pub text: String,
    pub style: CellStyle,
}

// ==========================================
// ReportSheet - 单个输出工作表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSheet {
    pub name: String,
    pub column_widths: Vec<f64>, // 下标 = 列号
    pub default_row_height: f64,
    pub frozen_rows: usize,
    pub merges: Vec<MergedBlock>,
    pub cells: Vec<ReportCell>, // 行优先
}

impl ReportSheet {
    pub fn cell(&self, row: usize, col: usize) -> Option<&ReportCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// 已使用的行数（含合并区）
    pub fn row_extent(&self) -> usize {
        let cell_rows = self.cells.iter().map(|c| c.row + 1);
        let merge_rows = self.merges.iter().map(|m| m.last_row + 1);
        cell_rows.chain(merge_rows).max().unwrap_or(0)
    }
}
