// ==========================================
// 库存盘点系统 - 数量守恒校验
// ==========================================
// 职责: 原始行合计 vs 矩阵合计,按文件分组小计
// 红线: 只检测不修正；不一致仅告警
// ==========================================

use crate::domain::stock::{ReconciliationResult, SourceRow, StockMatrix};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub struct Reconciler {}

impl Reconciler {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验汇总前后总量一致
    ///
    /// # 返回
    /// ReconciliationResult（per_file 按文件名升序）
    pub fn reconcile(&self, rows: &[SourceRow], matrix: &StockMatrix) -> ReconciliationResult {
        let raw_total = rows
            .iter()
            .map(|r| r.quantity)
            .fold(0, i64::saturating_add);
        let matrix_total = matrix.total();

        let mut per_file: BTreeMap<&str, i64> = BTreeMap::new();
        for row in rows {
            let subtotal = per_file.entry(row.source_file.as_str()).or_insert(0);
            *subtotal = subtotal.saturating_add(row.quantity);
        }

        let result = ReconciliationResult {
            raw_total,
            matrix_total,
            diff: raw_total.saturating_sub(matrix_total),
            per_file: per_file
                .into_iter()
                .map(|(file, subtotal)| (file.to_string(), subtotal))
                .collect(),
        };

        if result.is_balanced() {
            debug!(raw_total, matrix_total, "数量守恒校验通过");
        } else {
            warn!(raw_total, matrix_total, diff = result.diff, "数量守恒校验不一致");
        }
        result
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
