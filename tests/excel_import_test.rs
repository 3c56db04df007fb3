// ==========================================
// 集成测试 - 真实文件导入与报表导出
// ==========================================
// 测试目标: xlsx/csv 读取 → 流水线 → xlsx 报表回读
// 覆盖范围: UniversalSheetReader + PipelineRun + ReportRenderer + XlsxReportWriter
// ==========================================


use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use stock_check::config::StockCheckConfig;
use stock_check::domain::{IngestErrorReason, ParseFailureReason, Size};
use stock_check::engine::{MatrixFilter, PipelineRun};
use stock_check::importer::coerce_quantity;
use stock_check::importer::{report_file_name, ColumnLocator, SheetReader, UniversalSheetReader};
use stock_check::logging;
use stock_check::report::{ReportRenderer, XlsxReportWriter};
use test_helpers::{write_csv_fixture, write_xlsx_fixture, FixtureCell};

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

/// 泰文表头、标题行在上、含公式与千分位文本
fn thai_export_rows() -> Vec<Vec<FixtureCell>> {
    use FixtureCell::*;
    vec![
        vec![Text("รายงานสต็อก 2025-01-20")],
        vec![],
        vec![
            Text("ลำดับ"),
            Text("SKU"),
            Text("ชื่อสินค้า"),
            Text("คลัง"),
            Text("สต็อกทั้งหมด"),
            Text("สต็อกพร้อมขาย"),
        ],
        vec![Number(1.0), Text("T009-REDS"), Text("Shirt"), Text("W1"), Number(10.0), Number(8.0)],
        vec![
            Number(2.0),
            Text("T009-REDM"),
            Text("Shirt"),
            Text("W1"),
            Number(9.0),
            Formula("=2+3", 5.0),
        ],
        vec![
            Number(3.0),
            Text("T009-BLUEXL"),
            Text("Shirt"),
            Text("W1"),
            Number(1.0),
            Text("1,200"),
        ],
        vec![],
        vec![Number(4.0), Text("BROKEN"), Text("Shirt"), Text("W1"), Number(1.0), Number(1.0)],
        vec![Blank, Blank, Text("note"), Blank, Blank, Number(99.0)],
    ]
}

#[test]
fn test_xlsx_first_sheet_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx_fixture(dir.path(), "T009.xlsx", &thai_export_rows()).unwrap();

    let sheet = UniversalSheetReader
        .read_first_sheet(&path)
        .unwrap()
        .expect("workbook has a sheet");

    let layout = ColumnLocator::default().locate(&sheet);
    assert_eq!(layout.header_row, 3);
    assert_eq!(layout.code_column, 2);
    assert_eq!(layout.quantity_column, 6);

    assert_eq!(sheet.cell(4, 2).text(), "T009-REDS");
    assert_eq!(coerce_quantity(sheet.cell(5, 6)).value, 5);
    assert_eq!(coerce_quantity(sheet.cell(6, 6)).value, 1200);
}

#[test]
fn test_pipeline_over_real_files() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();

    let xlsx = write_xlsx_fixture(dir.path(), "T009.xlsx", &thai_export_rows()).unwrap();
    let csv = write_csv_fixture(
        dir.path(),
        "extra.csv",
        "No,SKU,Name,Brand,Available\n1,T009-REDS,Shirt,X,2\n2,,Shirt,X,7\n",
    )
    .unwrap();
    let unsupported = write_csv_fixture(dir.path(), "notes.txt", "hello").unwrap();
    let missing = dir.path().join("missing.xlsx");

    let run = PipelineRun::from_paths(report_date(), vec![xlsx, csv, unsupported, missing]);
    let outcome = run.execute(&StockCheckConfig::default());

    assert_eq!(outcome.matrix.len(), 2);
    let blue = &outcome.matrix.rows[0];
    assert_eq!((blue.model.as_str(), blue.color.as_str()), ("T009", "BLUE"));
    assert_eq!(blue.quantity(Size::Xl), 1200);
    let red = &outcome.matrix.rows[1];
    assert_eq!(red.quantity(Size::S), 10);
    assert_eq!(red.quantity(Size::M), 5);

    assert_eq!(outcome.reconciliation.raw_total, 1215);
    assert!(outcome.reconciliation.is_balanced());
    assert_eq!(
        outcome.reconciliation.per_file,
        vec![("T009.xlsx".to_string(), 1213), ("extra.csv".to_string(), 2)]
    );

    let errors: Vec<(&str, IngestErrorReason)> = outcome
        .ingest
        .errors
        .iter()
        .map(|e| (e.file.as_str(), e.reason))
        .collect();
    assert_eq!(
        errors,
        vec![
            ("T009.xlsx", IngestErrorReason::Parse(ParseFailureReason::MissingDash)),
            ("notes.txt", IngestErrorReason::UnreadableFile),
            ("missing.xlsx", IngestErrorReason::UnreadableFile),
        ]
    );
    assert_eq!(outcome.stats.uploaded_files, 4);
}

#[test]
fn test_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let xlsx = write_xlsx_fixture(dir.path(), "T009.xlsx", &thai_export_rows()).unwrap();
    let config = StockCheckConfig::default();
    let outcome = PipelineRun::from_paths(report_date(), vec![xlsx]).execute(&config);

    // 只导出 RED
    let view = MatrixFilter::new(None, "red").export_view(&outcome.matrix);
    let sheet = ReportRenderer::new(config.report.clone()).render(&view, report_date());

    let out = dir
        .path()
        .join(report_file_name(&config.report.title, report_date()));
    XlsxReportWriter::new(config.report.author.clone())
        .save(&sheet, &out)
        .unwrap();
    assert!(out.ends_with("ใบเช็คสต็อก_20250120.xlsx"));

    let mut workbook = open_workbook_auto(&out).unwrap();
    let range = workbook.worksheet_range("ใบเช็คสต็อก").unwrap();

    assert_eq!(
        range.get_value((0, 2)),
        Some(&Data::String("ใบเช็คสต็อก".to_string()))
    );
    assert_eq!(
        range.get_value((0, 7)),
        Some(&Data::String("วันที่อัปเดต".to_string()))
    );
    assert_eq!(
        range.get_value((1, 7)),
        Some(&Data::String("20/01/2025".to_string()))
    );
    assert_eq!(range.get_value((2, 8)), Some(&Data::String("4XL".to_string())));

    // 仅一行数据: T009 / RED
    assert_eq!(range.get_value((3, 1)), Some(&Data::String("RED".to_string())));
    assert_eq!(range.get_value((3, 2)), Some(&Data::Float(8.0)));
    assert_eq!(range.get_value((3, 3)), Some(&Data::Float(5.0)));
    assert_eq!(range.get_value((3, 8)), Some(&Data::Float(0.0)));
    assert_eq!(range.get_value((4, 0)), None);
}
