// ==========================================
// 库存盘点系统 - 命令行入口
// ==========================================
// 用法: stock-check [--date YYYY-MM-DD] [--out DIR] FILES...
// 输出: 盘点表 .xlsx,有错误时附 errors_YYYYMMDD.csv
// ==========================================

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use stock_check::config::ConfigManager;
use stock_check::engine::{MatrixFilter, PipelineOutcome, PipelineRun};
use stock_check::importer::{error_file_name, report_file_name, ErrorReport};
use stock_check::report::{parse_report_date, ReportRenderer, XlsxReportWriter};
use stock_check::{logging, PipelineStats, ReconciliationResult};
use tracing::info;

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// 将 ERP 库存导出表汇总为尺码矩阵盘点表
#[derive(Parser)]
#[command(name = "stock-check", version, about)]
struct Args {
    /// 库存导出文件（xlsx/xlsm/xls/xlsb/ods/csv）,按给定顺序读取
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// 报表日期 YYYY-MM-DD（默认今天）
    #[arg(long)]
    date: Option<String>,

    /// 输出目录
    #[arg(long, value_name = "DIR", default_value = ".")]
    out: PathBuf,

    /// 配置文件（JSON）
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 只导出指定型号
    #[arg(long)]
    model: Option<String>,

    /// 型号/颜色关键字
    #[arg(long, default_value = "")]
    query: String,

    /// 汇总输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// 日志输出为 JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    run_id: &'a str,
    report_date: String,
    stats: &'a PipelineStats,
    reconciliation: &'a ReconciliationResult,
    report_path: String,
    error_report_path: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_with_format(args.log_json);

    info!(version = stock_check::VERSION, "{} 启动", stock_check::APP_NAME);

    let config = ConfigManager::load(args.config.as_deref()).context("加载配置失败")?;
    let report_date = match &args.date {
        Some(raw) => parse_report_date(raw)?,
        None => Local::now().date_naive(),
    };

    // ==========================================
    // 执行流水线
    // ==========================================
    let run = PipelineRun::from_paths(report_date, args.files.iter().cloned());
    let outcome = run.execute(&config);

    // ==========================================
    // 输出报表
    // ==========================================
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("无法创建输出目录: {}", args.out.display()))?;

    let filter = MatrixFilter::new(args.model.clone(), args.query.clone());
    let filtered;
    let view = if filter.is_noop() {
        &outcome.matrix
    } else {
        filtered = filter.export_view(&outcome.matrix);
        &filtered
    };
    let sheet = ReportRenderer::new(config.report.clone()).render(view, report_date);

    let report_path = args.out.join(report_file_name(&config.report.title, report_date));
    XlsxReportWriter::new(config.report.author.clone())
        .save(&sheet, &report_path)
        .with_context(|| format!("报表写入失败: {}", report_path.display()))?;

    let error_report_path = if outcome.ingest.errors.is_empty() {
        None
    } else {
        let path = args.out.join(error_file_name(report_date));
        ErrorReport::write_to(&path, &outcome.ingest.errors)?;
        Some(path)
    };

    // ==========================================
    // 汇总输出
    // ==========================================
    let summary = RunSummary {
        run_id: &outcome.run_id,
        report_date: report_date.to_string(),
        stats: &outcome.stats,
        reconciliation: &outcome.reconciliation,
        report_path: report_path.display().to_string(),
        error_report_path: error_report_path.as_ref().map(|p| p.display().to_string()),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_text_summary(&outcome, &summary),
    }

    Ok(())
}

fn print_text_summary(outcome: &PipelineOutcome, summary: &RunSummary<'_>) {
    let stats = &outcome.stats;
    let check = &outcome.reconciliation;

    println!("文件数:        {}", stats.uploaded_files);
    println!("有效行数:      {}", stats.parsed_rows);
    println!("型号/颜色数:   {}", stats.distinct_model_colors);
    println!("SKU 数:        {}", stats.distinct_skus);
    let file_level = outcome
        .ingest
        .errors
        .iter()
        .filter(|e| e.reason.is_file_level())
        .count();
    println!(
        "错误数:        {} (文件级 {} / 行级 {})",
        stats.error_count,
        file_level,
        stats.error_count - file_level
    );
    println!("数量警告数:    {}", stats.warning_count);
    println!();
    println!(
        "数量校验: 原始 {} / 矩阵 {} / 差异 {} [{}]",
        check.raw_total,
        check.matrix_total,
        check.diff,
        if check.is_balanced() { "OK" } else { "MISMATCH" }
    );
    for (file, subtotal) in &check.per_file {
        println!("  {:<40} {}", file, subtotal);
    }
    println!();
    println!("报表: {}", summary.report_path);
    if let Some(path) = &summary.error_report_path {
        println!("错误报告: {}", path);
    }
}
