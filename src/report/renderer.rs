// ==========================================
// 库存盘点系统 - 报表渲染
// ==========================================
// 版式（A1 记法）:
//   C1:G2 标题 | H1:I1 日期标签 | H2:I2 日期
//   第 3 行表头（型号/颜色/七个尺码）,第 4 行起数据
// 红线: 只读矩阵,不修改；行序沿用矩阵顺序
// ==========================================

use crate::config::ReportLabels;
use crate::domain::stock::StockMatrix;
use crate::domain::types::Size;
use crate::importer::error::{ImportError, ImportResult};
use crate::report::layout::{
    BorderWeight, Borders, CellStyle, HAlign, MergedBlock, ReportCell, ReportSheet, ReportValue,
};
use chrono::NaiveDate;

// ===== 版式常量（0 起） =====
pub const HEADER_ROW: usize = 2;
pub const FIRST_DATA_ROW: usize = 3;
pub const MODEL_COL: usize = 0;
pub const COLOR_COL: usize = 1;
pub const FIRST_SIZE_COL: usize = 2;
pub const LAST_COL: usize = FIRST_SIZE_COL + Size::ALL.len() - 1;

const MODEL_COL_WIDTH: f64 = 10.0;
const COLOR_COL_WIDTH: f64 = 16.0;
const SIZE_COL_WIDTH: f64 = 9.0;
const DEFAULT_ROW_HEIGHT: f64 = 20.0;

const WHITE: u32 = 0xFFFFFF;
const LIGHT_GREY: u32 = 0xF3F4F6;

// ==========================================
// 数量分档（按顺序取第一个命中）
// ==========================================
pub struct QuantityTier {
    pub name: &'static str,
    pub applies: fn(i64) -> bool,
    pub font_color: u32,
    pub bold: bool,
}

fn is_zero(v: i64) -> bool {
    v == 0
}

fn is_low(v: i64) -> bool {
    v <= 5
}

fn is_any(_: i64) -> bool {
    true
}

pub static QUANTITY_TIERS: [QuantityTier; 3] = [
    QuantityTier {
        name: "zero",
        applies: is_zero,
        font_color: 0x6B7280,
        bold: false,
    },
    QuantityTier {
        name: "low",
        applies: is_low,
        font_color: 0xB45309,
        bold: true,
    },
    QuantityTier {
        name: "normal",
        applies: is_any,
        font_color: 0x111827,
        bold: false,
    },
];

pub fn tier_for(quantity: i64) -> &'static QuantityTier {
    QUANTITY_TIERS
        .iter()
        .find(|tier| (tier.applies)(quantity))
        .unwrap_or(&QUANTITY_TIERS[QUANTITY_TIERS.len() - 1])
}

/// 报表日期显示: dd/mm/yyyy
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// 解析 YYYY-MM-DD 输入
pub fn parse_report_date(input: &str) -> ImportResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ImportError::DateFormatError(input.to_string()))
}

pub struct ReportRenderer {
    labels: ReportLabels,
}

impl ReportRenderer {
    pub fn new(labels: ReportLabels) -> Self {
        Self { labels }
    }

    /// 矩阵 → 报表版式
    ///
    /// # 参数
    /// - matrix: 已排序的矩阵（或其过滤视图）
    /// - report_date: 报表日期
    ///
    /// # 返回
    /// ReportSheet: 3 行固定区 + 每个矩阵行一行
    pub fn render(&self, matrix: &StockMatrix, report_date: NaiveDate) -> ReportSheet {
        let mut column_widths = vec![MODEL_COL_WIDTH, COLOR_COL_WIDTH];
        column_widths.extend(Size::ALL.iter().map(|_| SIZE_COL_WIDTH));

        let last_row = HEADER_ROW + matrix.len();
        let mut cells = Vec::with_capacity((matrix.len() + 1) * (LAST_COL + 1));

        // 表头
        let mut header_labels = vec![
            self.labels.model_label.clone(),
            self.labels.color_label.clone(),
        ];
        header_labels.extend(Size::ALL.iter().map(|s| s.as_str().to_string()));
        for (col, label) in header_labels.into_iter().enumerate() {
            cells.push(ReportCell {
                row: HEADER_ROW,
                col,
                value: ReportValue::Text(label),
                style: CellStyle {
                    bold: true,
                    fill: Some(WHITE),
                    align: Some(HAlign::Center),
                    borders: table_borders(HEADER_ROW, col, last_row),
                    ..CellStyle::default()
                },
            });
        }

        // 数据行
        for (offset, item) in matrix.rows.iter().enumerate() {
            let row = FIRST_DATA_ROW + offset;
            for (col, text) in [(MODEL_COL, &item.model), (COLOR_COL, &item.color)] {
                cells.push(ReportCell {
                    row,
                    col,
                    value: ReportValue::Text(text.clone()),
                    style: CellStyle {
                        fill: Some(WHITE),
                        align: Some(HAlign::Left),
                        borders: table_borders(row, col, last_row),
                        ..CellStyle::default()
                    },
                });
            }

            for (i, size) in Size::ALL.iter().enumerate() {
                let col = FIRST_SIZE_COL + i;
                let quantity = item.quantity(*size);
                let tier = tier_for(quantity);
                cells.push(ReportCell {
                    row,
                    col,
                    value: ReportValue::Number(quantity as f64),
                    style: CellStyle {
                        bold: tier.bold,
                        font_color: Some(tier.font_color),
                        fill: Some(WHITE),
                        align: Some(HAlign::Center),
                        borders: table_borders(row, col, last_row),
                        ..CellStyle::default()
                    },
                });
            }
        }

        ReportSheet {
            name: self.labels.title.clone(),
            column_widths,
            default_row_height: DEFAULT_ROW_HEIGHT,
            frozen_rows: HEADER_ROW + 1,
            merges: self.title_and_date_blocks(report_date),
            cells,
        }
    }

    fn title_and_date_blocks(&self, report_date: NaiveDate) -> Vec<MergedBlock> {
        let date_box_style = |fill: u32| CellStyle {
            bold: true,
            font_size: Some(14.0),
            fill: Some(fill),
            align: Some(HAlign::Center),
            borders: Borders::all(BorderWeight::Medium),
            ..CellStyle::default()
        };

        vec![
            // C1:G2
            MergedBlock {
                first_row: 0,
                first_col: 2,
                last_row: 1,
                last_col: 6,
                text: self.labels.title.clone(),
                style: CellStyle {
                    bold: true,
                    font_size: Some(28.0),
                    fill: Some(WHITE),
                    align: Some(HAlign::Center),
                    ..CellStyle::default()
                },
            },
            // H1:I1
            MergedBlock {
                first_row: 0,
                first_col: 7,
                last_row: 0,
                last_col: 8,
                text: self.labels.date_label.clone(),
                style: date_box_style(LIGHT_GREY),
            },
            // H2:I2
            MergedBlock {
                first_row: 1,
                first_col: 7,
                last_row: 1,
                last_col: 8,
                text: format_report_date(report_date),
                style: date_box_style(WHITE),
            },
        ]
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(ReportLabels::default())
    }
}

// 表头四周 medium；数据区内部 thin,外沿 medium
fn table_borders(row: usize, col: usize, last_row: usize) -> Borders {
    let base = if row == HEADER_ROW {
        BorderWeight::Medium
    } else {
        BorderWeight::Thin
    };
    let edge = |on_edge: bool| if on_edge { BorderWeight::Medium } else { base };

    Borders {
        top: edge(row == HEADER_ROW),
        bottom: edge(row == last_row),
        left: edge(col == MODEL_COL),
        right: edge(col == LAST_COL),
    }
}
