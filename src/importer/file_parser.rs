// ==========================================
// 库存盘点系统 - 工作表读取器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xlsm/.xls/.xlsb/.ods) / CSV (.csv)
// ==========================================

use crate::domain::worksheet::{CellValue, Worksheet};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sheet_reader_trait::SheetReader;
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// Excel Reader 实现
// ==========================================
pub struct ExcelSheetReader;

impl SheetReader for ExcelSheetReader {
    fn read_first_sheet(&self, file_path: &Path) -> ImportResult<Option<Worksheet>> {
        ensure_exists(file_path)?;

        // 检查扩展名
        let ext = lowercase_extension(file_path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开工作簿（按扩展名自动选择格式）
        let mut workbook = open_workbook_auto(file_path)?;

        // 只读取第一个 sheet
        let sheet_name = match workbook.sheet_names().first() {
            Some(name) => name.clone(),
            None => return Ok(None),
        };

        let values = workbook.worksheet_range(&sheet_name)?;
        // 公式读取失败不影响取值（部分格式不支持公式）
        let formulas = workbook.worksheet_formula(&sheet_name).ok();

        let mut sheet = Worksheet::new(sheet_name);
        fill_values(&mut sheet, &values);
        if let Some(formulas) = formulas {
            mark_computed_cells(&mut sheet, &values, &formulas);
        }

        debug!(
            file = %file_path.display(),
            sheet = %sheet.name,
            rows = sheet.row_count(),
            "Excel 工作表读取完成"
        );
        Ok(Some(sheet))
    }
}

/// 按绝对位置写入单元格值（Range 可能不从 A1 开始）
fn fill_values(sheet: &mut Worksheet, values: &Range<Data>) {
    let (start_row, start_col) = values.start().unwrap_or((0, 0));
    for (row, col, data) in values.used_cells() {
        let value = convert_data(data);
        if value == CellValue::Empty {
            continue;
        }
        sheet.set_cell(
            start_row as usize + row + 1,
            start_col as usize + col + 1,
            value,
        );
    }
}

/// 带公式的单元格改为 Computed,保留缓存的数值结果
///
/// 缓存结果为文本的公式保持为 Text。
fn mark_computed_cells(sheet: &mut Worksheet, values: &Range<Data>, formulas: &Range<String>) {
    let (start_row, start_col) = formulas.start().unwrap_or((0, 0));
    for (row, col, formula) in formulas.used_cells() {
        if formula.trim().is_empty() {
            continue;
        }
        let abs_row = start_row + row as u32;
        let abs_col = start_col + col as u32;
        let cached = match values.get_value((abs_row, abs_col)) {
            Some(Data::String(s)) if !s.trim().is_empty() => continue,
            Some(Data::Float(f)) => Some(*f),
            Some(Data::Int(i)) => Some(*i as f64),
            Some(Data::DateTime(dt)) => Some(dt.as_f64()),
            _ => None,
        };
        sheet.set_cell(
            abs_row as usize + 1,
            abs_col as usize + 1,
            CellValue::Computed { cached },
        );
    }
}

fn convert_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
        // 错误值按文本保留,便于在错误报告中定位
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}

// ==========================================
// CSV Reader 实现
// ==========================================
// 整个文件视为一个工作表,所有单元格为文本
pub struct CsvSheetReader;

impl SheetReader for CsvSheetReader {
    fn read_first_sheet(&self, file_path: &Path) -> ImportResult<Option<Worksheet>> {
        ensure_exists(file_path)?;

        let ext = lowercase_extension(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false) // 表头行由列定位器识别
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(CellValue::from).collect::<Vec<_>>());
        }

        let name = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet1")
            .to_string();
        Ok(Some(Worksheet::from_rows(name, rows)))
    }
}

// ==========================================
// 通用读取器（根据扩展名自动选择）
// ==========================================
pub struct UniversalSheetReader;

impl SheetReader for UniversalSheetReader {
    fn read_first_sheet(&self, file_path: &Path) -> ImportResult<Option<Worksheet>> {
        let ext = lowercase_extension(file_path);
        match ext.as_str() {
            "csv" => CsvSheetReader.read_first_sheet(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelSheetReader.read_first_sheet(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_reader_valid_file() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "No,SKU,Name").unwrap();
        writeln!(temp_file, "1,T009-REDS,Shirt").unwrap();
        writeln!(temp_file, "2,,").unwrap();

        let sheet = CsvSheetReader
            .read_first_sheet(temp_file.path())
            .unwrap()
            .unwrap();

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.cell(2, 2), &CellValue::Text("T009-REDS".to_string()));
        assert_eq!(sheet.cell(3, 2), &CellValue::Empty);
    }

    #[test]
    fn test_csv_reader_file_not_found() {
        let result = CsvSheetReader.read_first_sheet(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_reader_rejects_unknown_extension() {
        let result = UniversalSheetReader.read_first_sheet(Path::new("stock.pdf"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "pdf"));
    }

    #[test]
    fn test_convert_data() {
        assert_eq!(convert_data(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(convert_data(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(convert_data(&Data::Bool(true)), CellValue::Bool(true));
    }
}
