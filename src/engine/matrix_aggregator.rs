// ==========================================
// 库存盘点系统 - 尺码矩阵汇总引擎
// ==========================================
// 输入: 已校验的 SourceRow 列表
// 输出: StockMatrix（按 model, color 升序）
// 红线: 重复行数量累加,绝不覆盖
// ==========================================

use crate::domain::stock::{MatrixRow, SourceRow, StockMatrix};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

// ==========================================
// MatrixAggregator - 矩阵汇总引擎
// ==========================================
pub struct MatrixAggregator {
    // 无状态引擎
}

impl MatrixAggregator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 按 (model, color) 分组累加各尺码数量
    ///
    /// # 参数
    /// - `rows`: 已校验的库存行（任意顺序）
    ///
    /// # 返回
    /// StockMatrix: 行按 model、color 字典序升序,缺失尺码为 0
    pub fn aggregate(&self, rows: &[SourceRow]) -> StockMatrix {
        // BTreeMap 的键序即最终输出顺序
        let mut cells: BTreeMap<(String, String), MatrixRow> = BTreeMap::new();
        let mut models = BTreeSet::new();

        for row in rows {
            let key = (row.model().to_string(), row.color().to_string());
            cells
                .entry(key)
                .or_insert_with(|| MatrixRow::new(row.model(), row.color()))
                .add(row.size(), row.quantity);
            models.insert(row.model().to_string());
        }

        let matrix = StockMatrix {
            rows: cells.into_values().collect(),
            models,
        };

        debug!(
            input_rows = rows.len(),
            matrix_rows = matrix.len(),
            models = matrix.models.len(),
            "矩阵汇总完成"
        );
        matrix
    }
}

impl Default for MatrixAggregator {
    fn default() -> Self {
        Self::new()
    }
}
