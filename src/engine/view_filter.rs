// ==========================================
// 库存盘点系统 - 矩阵视图过滤
// ==========================================
// 只读视图: 不修改原矩阵,不参与守恒校验
// ==========================================

use crate::domain::stock::{MatrixRow, StockMatrix};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixFilter {
    pub model: Option<String>, // None = 全部型号
    pub query: String,         // 型号/颜色关键字,大小写不敏感
}

impl MatrixFilter {
    pub fn new(model: Option<String>, query: impl Into<String>) -> Self {
        Self {
            model: model.filter(|m| !m.trim().is_empty()),
            query: query.into(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.model.is_none() && self.query.trim().is_empty()
    }

    pub fn matches(&self, row: &MatrixRow) -> bool {
        if let Some(model) = &self.model {
            if &row.model != model {
                return false;
            }
        }

        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || row.model.to_lowercase().contains(&query)
            || row.color.to_lowercase().contains(&query)
    }

    /// 过滤后的矩阵（models 保持原集合,供下拉选择使用）
    pub fn apply(&self, matrix: &StockMatrix) -> StockMatrix {
        StockMatrix {
            rows: matrix
                .rows
                .iter()
                .filter(|row| self.matches(row))
                .cloned()
                .collect(),
            models: matrix.models.clone(),
        }
    }

    /// 导出用矩阵: 过滤结果非空时用过滤结果,否则用完整矩阵
    pub fn export_view(&self, matrix: &StockMatrix) -> StockMatrix {
        let filtered = self.apply(matrix);
        if filtered.is_empty() {
            matrix.clone()
        } else {
            filtered
        }
    }
}
