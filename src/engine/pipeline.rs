// ==========================================
// 库存盘点系统 - 流水线编排
// ==========================================
// 主流程: 读取文件 → 行导入 → 矩阵汇总 → 守恒校验
// 红线: 每次运行独占自己的数据,不持有跨运行的全局状态
// ==========================================

use crate::config::StockCheckConfig;
use crate::domain::stock::{
    IngestError, IngestOutcome, PipelineStats, ReconciliationResult, StockMatrix,
};
use crate::domain::types::{IngestErrorReason, Size};
use crate::engine::matrix_aggregator::MatrixAggregator;
use crate::engine::reconciler::Reconciler;
use crate::importer::column_locator::ColumnLocator;
use crate::importer::file_parser::UniversalSheetReader;
use crate::importer::row_ingester::{RowIngester, SourceSheet};
use crate::importer::sheet_reader_trait::SheetReader;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// SourceInput - 单个输入源
// ==========================================
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// 磁盘文件（由 SheetReader 解码）
    File(PathBuf),
    /// 已解码的工作表
    Sheet(SourceSheet),
}

impl SourceInput {
    /// 错误报告与按文件汇总使用的名称
    pub fn display_name(&self) -> String {
        match self {
            SourceInput::File(path) => file_display_name(path),
            SourceInput::Sheet(sheet) => sheet.name.clone(),
        }
    }
}

fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ==========================================
// PipelineOutcome - 单次运行结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub run_id: String,
    pub report_date: NaiveDate,
    pub ingest: IngestOutcome,
    pub matrix: StockMatrix,
    pub reconciliation: ReconciliationResult,
    pub stats: PipelineStats,
}

// ==========================================
// PipelineRun - 单次运行的值对象
// ==========================================
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub run_id: String,
    pub report_date: NaiveDate,
    pub sources: Vec<SourceInput>, // 按调用方顺序处理
}

impl PipelineRun {
    pub fn new(report_date: NaiveDate, sources: Vec<SourceInput>) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            report_date,
            sources,
        }
    }

    pub fn from_paths<I, P>(report_date: NaiveDate, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(
            report_date,
            paths
                .into_iter()
                .map(|p| SourceInput::File(p.into()))
                .collect(),
        )
    }

    /// 使用默认读取器（按扩展名分派）执行
    pub fn execute(&self, config: &StockCheckConfig) -> PipelineOutcome {
        self.execute_with_reader(config, &UniversalSheetReader)
    }

    /// 执行完整流水线
    ///
    /// # 参数
    /// - config: 列识别规则
    /// - reader: 文件 → 工作表读取器
    ///
    /// # 返回
    /// PipelineOutcome（不返回 Err,失败均记录在 ingest.errors）
    #[instrument(skip_all, fields(run_id = %self.run_id, sources = self.sources.len()))]
    pub fn execute_with_reader(
        &self,
        config: &StockCheckConfig,
        reader: &dyn SheetReader,
    ) -> PipelineOutcome {
        info!(report_date = %self.report_date, "开始执行盘点流水线");

        // ==========================================
        // 步骤1: 逐个文件读取并导入
        // ==========================================
        let ingester = RowIngester::new(ColumnLocator::new(config.columns.clone()));
        let mut ingest = IngestOutcome::default();

        for source in &self.sources {
            match source {
                SourceInput::Sheet(sheet) => ingester.ingest_source(sheet, &mut ingest),
                SourceInput::File(path) => {
                    let name = file_display_name(path);
                    match reader.read_first_sheet(path) {
                        Ok(worksheet) => {
                            ingester.ingest_source(&SourceSheet::new(name, worksheet), &mut ingest)
                        }
                        Err(e) => {
                            warn!(file = %path.display(), error = %e, "文件无法读取，跳过");
                            ingest.errors.push(IngestError::file_level(
                                name,
                                IngestErrorReason::UnreadableFile,
                            ));
                        }
                    }
                }
            }
        }

        // ==========================================
        // 步骤2: 矩阵汇总
        // ==========================================
        let matrix = MatrixAggregator::new().aggregate(&ingest.rows);

        // ==========================================
        // 步骤3: 守恒校验
        // ==========================================
        let reconciliation = Reconciler::new().reconcile(&ingest.rows, &matrix);

        let stats = collect_stats(self.sources.len(), &ingest, &matrix);
        info!(
            parsed_rows = stats.parsed_rows,
            matrix_rows = stats.distinct_model_colors,
            errors = stats.error_count,
            warnings = stats.warning_count,
            balanced = reconciliation.is_balanced(),
            "盘点流水线执行完成"
        );

        PipelineOutcome {
            run_id: self.run_id.clone(),
            report_date: self.report_date,
            ingest,
            matrix,
            reconciliation,
            stats,
        }
    }
}

/// 汇总对外指标
pub fn collect_stats(
    uploaded_files: usize,
    ingest: &IngestOutcome,
    matrix: &StockMatrix,
) -> PipelineStats {
    let distinct_skus: BTreeSet<(&str, &str, Size)> = ingest
        .rows
        .iter()
        .map(|r| (r.model(), r.color(), r.size()))
        .collect();

    PipelineStats {
        uploaded_files,
        parsed_rows: ingest.rows.len(),
        distinct_model_colors: matrix.len(),
        distinct_skus: distinct_skus.len(),
        error_count: ingest.errors.len(),
        warning_count: ingest.warnings.len(),
    }
}
