// ==========================================
// 库存盘点系统 - 工作表网格模型
// ==========================================
// 职责: 以 (行, 列) 1 起寻址的类型化单元格网格
// 用途: 读取器（Excel/CSV）输出,列定位与行导入只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// 公式单元格,仅保留缓存的计算结果
    Computed { cached: Option<f64> },
}

impl CellValue {
    /// 单元格的展示文本（已 TRIM）
    ///
    /// 整数值不带小数部分,公式取缓存结果。
    pub fn text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Computed { cached } => cached.map(format_number).unwrap_or_default(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// ==========================================
// Worksheet - 工作表
// ==========================================
// 寻址: 行/列均从 1 开始；越界读取返回 Empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// 由行数据直接构造（第 0 个元素即第 1 行）
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// 最后一行的行号（含空行）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        if row == 0 || col == 0 {
            return &EMPTY;
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .unwrap_or(&EMPTY)
    }

    /// 写入单元格,按需扩展网格
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if row == 0 || col == 0 {
            return;
        }
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < col {
            cells.resize(col, CellValue::Empty);
        }
        cells[col - 1] = value;
    }

    /// 指定行每一列的文本（已 TRIM）,下标 0 对应第 1 列
    pub fn row_texts(&self, row: usize) -> Vec<String> {
        if row == 0 {
            return Vec::new();
        }
        self.rows
            .get(row - 1)
            .map(|cells| cells.iter().map(CellValue::text).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_formats_integral_numbers() {
        assert_eq!(CellValue::Number(12.0).text(), "12");
        assert_eq!(CellValue::Number(2.5).text(), "2.5");
        assert_eq!(CellValue::Computed { cached: Some(7.0) }.text(), "7");
        assert_eq!(CellValue::Computed { cached: None }.text(), "");
        assert_eq!(CellValue::Text("  A-REDS ".to_string()).text(), "A-REDS");
    }

    #[test]
    fn test_cell_out_of_bounds_is_empty() {
        let ws = Worksheet::from_rows("S1", vec![vec![CellValue::from("x")]]);
        assert_eq!(ws.cell(1, 1), &CellValue::Text("x".to_string()));
        assert_eq!(ws.cell(0, 1), &CellValue::Empty);
        assert_eq!(ws.cell(5, 5), &CellValue::Empty);
    }

    #[test]
    fn test_set_cell_grows_grid() {
        let mut ws = Worksheet::new("S1");
        ws.set_cell(3, 4, CellValue::Number(1.0));
        assert_eq!(ws.row_count(), 3);
        assert_eq!(ws.cell(3, 4), &CellValue::Number(1.0));
        assert_eq!(ws.row_texts(3), vec!["", "", "", "1"]);
        assert!(ws.row_texts(1).is_empty());
    }
}
