// ==========================================
// 库存盘点系统 - xlsx 报表写入
// ==========================================
// 工具: rust_xlsxwriter
// 职责: ReportSheet → .xlsx（文件或内存缓冲）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::report::layout::{BorderWeight, CellStyle, HAlign, ReportSheet, ReportValue};
use rust_xlsxwriter::{
    Color, DocProperties, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet,
};
use std::path::Path;
use tracing::{debug, info};

pub struct XlsxReportWriter {
    author: String,
}

impl XlsxReportWriter {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
        }
    }

    /// 写入文件
    pub fn save(&self, sheet: &ReportSheet, path: &Path) -> ImportResult<()> {
        let mut workbook = self.build_workbook(sheet)?;
        workbook.save(path)?;
        info!(path = %path.display(), rows = sheet.row_extent(), "报表已写入");
        Ok(())
    }

    /// 写入内存缓冲
    pub fn save_to_buffer(&self, sheet: &ReportSheet) -> ImportResult<Vec<u8>> {
        let mut workbook = self.build_workbook(sheet)?;
        let buffer = workbook.save_to_buffer()?;
        debug!(bytes = buffer.len(), "报表已写入内存");
        Ok(buffer)
    }

    fn build_workbook(&self, sheet: &ReportSheet) -> ImportResult<Workbook> {
        let mut workbook = Workbook::new();
        let properties = DocProperties::new().set_author(&self.author);
        workbook.set_properties(&properties);

        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet)?;
        Ok(workbook)
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &ReportSheet) -> ImportResult<()> {
    worksheet.set_name(&sheet.name)?;
    worksheet.set_default_row_height(sheet.default_row_height);
    worksheet.set_freeze_panes(cast_row_num(sheet.frozen_rows)?, 0)?;

    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(cast_col_num(col)?, *width)?;
    }

    for merge in &sheet.merges {
        worksheet.merge_range(
            cast_row_num(merge.first_row)?,
            cast_col_num(merge.first_col)?,
            cast_row_num(merge.last_row)?,
            cast_col_num(merge.last_col)?,
            &merge.text,
            &derive_format(&merge.style),
        )?;
    }

    for cell in &sheet.cells {
        let row = cast_row_num(cell.row)?;
        let col = cast_col_num(cell.col)?;
        let format = derive_format(&cell.style);
        match &cell.value {
            ReportValue::Text(text) => {
                worksheet.write_string_with_format(row, col, text, &format)?;
            }
            ReportValue::Number(value) => {
                worksheet.write_number_with_format(row, col, *value, &format)?;
            }
        }
    }

    Ok(())
}

fn derive_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if let Some(color) = style.font_color {
        format = format.set_font_color(Color::RGB(color));
    }
    if let Some(fill) = style.fill {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(fill));
    }
    if let Some(align) = style.align {
        format = format
            .set_align(match align {
                HAlign::Left => FormatAlign::Left,
                HAlign::Center => FormatAlign::Center,
            })
            .set_align(FormatAlign::VerticalCenter);
    }

    format
        .set_border_top(derive_format_border(style.borders.top))
        .set_border_bottom(derive_format_border(style.borders.bottom))
        .set_border_left(derive_format_border(style.borders.left))
        .set_border_right(derive_format_border(style.borders.right))
}

fn derive_format_border(weight: BorderWeight) -> FormatBorder {
    match weight {
        BorderWeight::None => FormatBorder::None,
        BorderWeight::Thin => FormatBorder::Thin,
        BorderWeight::Medium => FormatBorder::Medium,
    }
}

fn cast_row_num(value: usize) -> ImportResult<u32> {
    u32::try_from(value)
        .map_err(|_| ImportError::ReportWriteError(format!("行号越界: {}", value)))
}

fn cast_col_num(value: usize) -> ImportResult<u16> {
    u16::try_from(value)
        .map_err(|_| ImportError::ReportWriteError(format!("列号越界: {}", value)))
}
