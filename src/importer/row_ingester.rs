// ==========================================
// 库存盘点系统 - 行导入器
// ==========================================
// 流程: 列定位 → 逐行读取 SKU/数量 → SKU 解析 → 生成 SourceRow
// 红线: 行级失败不中断文件,文件级失败不中断批次
// ==========================================

use crate::domain::stock::{IngestError, IngestOutcome, QuantityWarning, SourceRow};
use crate::domain::types::IngestErrorReason;
use crate::domain::worksheet::{CellValue, Worksheet};
use crate::importer::code_parser::CodeParser;
use crate::importer::column_locator::ColumnLocator;
use tracing::{debug, info, instrument, warn};

// ==========================================
// SourceSheet - 待导入的单个文件
// ==========================================
#[derive(Debug, Clone)]
pub struct SourceSheet {
    pub name: String,                 // 文件名（用于错误报告和按文件汇总）
    pub worksheet: Option<Worksheet>, // None = 文件无工作表
}

impl SourceSheet {
    pub fn new(name: impl Into<String>, worksheet: Option<Worksheet>) -> Self {
        Self {
            name: name.into(),
            worksheet,
        }
    }
}

// ==========================================
// QuantityCoercion - 数量转换结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityCoercion {
    pub value: i64,
    pub recognized: bool, // false = 无法识别,已按 0 计
}

/// 可精确表示的最大整数数量（2^53 - 1）
const MAX_EXACT_QUANTITY: f64 = 9_007_199_254_740_991.0;

/// 数量单元格 → 整数（向零截断）
///
/// - 数值: 原值
/// - 文本: 去千分位逗号后按数字解析,空串为 0
/// - 公式: 缓存结果
/// - 其他/非有限值/绝对值超过 2^53: 0（标记为无法识别）
pub fn coerce_quantity(cell: &CellValue) -> QuantityCoercion {
    let parsed = match cell {
        CellValue::Empty => Some(0.0),
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => {
            let cleaned = s.replace(',', "");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                Some(0.0)
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        CellValue::Computed { cached } => *cached,
        CellValue::Bool(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v.abs() <= MAX_EXACT_QUANTITY => QuantityCoercion {
            value: v.trunc() as i64,
            recognized: true,
        },
        _ => QuantityCoercion {
            value: 0,
            recognized: false,
        },
    }
}

pub struct RowIngester {
    locator: ColumnLocator,
    parser: CodeParser,
}

impl RowIngester {
    pub fn new(locator: ColumnLocator) -> Self {
        Self {
            locator,
            parser: CodeParser,
        }
    }

    /// 导入多个文件（按调用方顺序依次处理）
    #[instrument(skip_all, fields(files = sources.len()))]
    pub fn ingest(&self, sources: &[SourceSheet]) -> IngestOutcome {
        let mut outcome = IngestOutcome::default();

        for source in sources {
            self.ingest_source(source, &mut outcome);
        }

        info!(
            rows = outcome.rows.len(),
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            "行导入完成"
        );
        outcome
    }

    /// 导入单个文件,结果追加到 outcome
    pub fn ingest_source(&self, source: &SourceSheet, outcome: &mut IngestOutcome) {
        match &source.worksheet {
            Some(sheet) => self.ingest_sheet(&source.name, sheet, outcome),
            None => {
                warn!(file = %source.name, "文件无工作表，跳过");
                outcome.errors.push(IngestError::file_level(
                    source.name.clone(),
                    IngestErrorReason::NoWorksheet,
                ));
            }
        }
    }

    fn ingest_sheet(&self, file: &str, sheet: &Worksheet, outcome: &mut IngestOutcome) {
        let layout = self.locator.locate(sheet);
        let rows_before = outcome.rows.len();
        let errors_before = outcome.errors.len();

        for row in (layout.header_row + 1)..=sheet.row_count() {
            let sku = sheet.cell(row, layout.code_column).text();
            // 空行不是错误
            if sku.is_empty() {
                continue;
            }

            let quantity_cell = sheet.cell(row, layout.quantity_column);
            let quantity = coerce_quantity(quantity_cell);

            match self.parser.parse(&sku) {
                Ok(code) => {
                    if !quantity.recognized {
                        debug!(file, row, sku = %sku, "数量无法识别，按 0 计");
                        outcome.warnings.push(QuantityWarning {
                            file: file.to_string(),
                            sku: code.raw.clone(),
                            raw: quantity_cell.text(),
                        });
                    }
                    outcome.rows.push(SourceRow {
                        source_file: file.to_string(),
                        code,
                        quantity: quantity.value,
                    });
                }
                Err(failure) => {
                    debug!(file, row, sku = %sku, reason = %failure.reason, "SKU 解析失败");
                    outcome.errors.push(IngestError::from_failure(file, failure));
                }
            }
        }

        info!(
            file,
            header_row = layout.header_row,
            code_column = layout.code_column,
            quantity_column = layout.quantity_column,
            rows = outcome.rows.len() - rows_before,
            errors = outcome.errors.len() - errors_before,
            "文件导入完成"
        );
    }
}

impl Default for RowIngester {
    fn default() -> Self {
        Self::new(ColumnLocator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ParseFailureReason, Size};

    fn header() -> Vec<CellValue> {
        ["No", "SKU", "Name", "Brand", "Available"]
            .iter()
            .map(|v| CellValue::from(*v))
            .collect()
    }

    fn data_row(sku: CellValue, qty: CellValue) -> Vec<CellValue> {
        vec![
            CellValue::from("1"),
            sku,
            CellValue::from("Shirt"),
            CellValue::from("X"),
            qty,
        ]
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity(&CellValue::Number(12.9)).value, 12);
        assert_eq!(coerce_quantity(&CellValue::Number(-3.7)).value, -3);
        assert_eq!(coerce_quantity(&CellValue::from("1,234")).value, 1234);
        assert_eq!(coerce_quantity(&CellValue::from(" 7.5 ")).value, 7);
        assert_eq!(
            coerce_quantity(&CellValue::Computed { cached: Some(4.0) }).value,
            4
        );

        let bad = coerce_quantity(&CellValue::from("abc"));
        assert_eq!(bad.value, 0);
        assert!(!bad.recognized);

        let missing = coerce_quantity(&CellValue::Computed { cached: None });
        assert_eq!(missing.value, 0);
        assert!(!missing.recognized);

        assert!(!coerce_quantity(&CellValue::Number(f64::INFINITY)).recognized);
        assert!(!coerce_quantity(&CellValue::from("NaN")).recognized);

        // 超出精确整数范围
        for cell in [
            CellValue::Number(1e19),
            CellValue::Number(-1e19),
            CellValue::from("9,300,000,000,000,000,000"),
        ] {
            let huge = coerce_quantity(&cell);
            assert_eq!(huge.value, 0);
            assert!(!huge.recognized);
        }
        let edge = coerce_quantity(&CellValue::Number(9_007_199_254_740_991.0));
        assert_eq!(edge.value, 9_007_199_254_740_991);
        assert!(edge.recognized);

        let blank = coerce_quantity(&CellValue::Empty);
        assert_eq!(blank.value, 0);
        assert!(blank.recognized);
    }

    #[test]
    fn test_ingest_rows_and_errors() {
        let sheet = Worksheet::from_rows(
            "Sheet1",
            vec![
                header(),
                data_row(CellValue::from("T009-REDS"), CellValue::Number(3.0)),
                data_row(CellValue::Empty, CellValue::Number(9.0)),
                data_row(CellValue::from("T009-RED"), CellValue::Number(1.0)),
                data_row(CellValue::from("T009-REDXL"), CellValue::from("abc")),
            ],
        );

        let outcome = RowIngester::default().ingest(&[SourceSheet::new("T009.xlsx", Some(sheet))]);

        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].size(), Size::S);
        assert_eq!(outcome.rows[0].quantity, 3);
        assert_eq!(outcome.rows[1].size(), Size::Xl);
        assert_eq!(outcome.rows[1].quantity, 0);

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].file, "T009.xlsx");
        assert_eq!(outcome.errors[0].sku, "T009-RED");
        assert_eq!(
            outcome.errors[0].reason,
            IngestErrorReason::Parse(ParseFailureReason::UnknownSize)
        );

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].raw, "abc");
    }

    #[test]
    fn test_missing_worksheet_is_non_fatal() {
        let sheet = Worksheet::from_rows(
            "Sheet1",
            vec![
                header(),
                data_row(CellValue::from("A-REDS"), CellValue::Number(2.0)),
            ],
        );

        let outcome = RowIngester::default().ingest(&[
            SourceSheet::new("broken.xlsx", None),
            SourceSheet::new("ok.xlsx", Some(sheet)),
        ]);

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].reason, IngestErrorReason::NoWorksheet);
        assert_eq!(outcome.errors[0].sku, "");
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].source_file, "ok.xlsx");
    }

    #[test]
    fn test_numeric_sku_cell_is_parsed_as_text() {
        let sheet = Worksheet::from_rows(
            "Sheet1",
            vec![header(), data_row(CellValue::Number(1234.0), CellValue::Number(1.0))],
        );
        let outcome = RowIngester::default().ingest(&[SourceSheet::new("f.xlsx", Some(sheet))]);
        assert_eq!(outcome.errors[0].sku, "1234");
        assert_eq!(
            outcome.errors[0].reason,
            IngestErrorReason::Parse(ParseFailureReason::MissingDash)
        );
    }
}
