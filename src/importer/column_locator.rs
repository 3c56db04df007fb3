// ==========================================
// 库存盘点系统 - 列定位器
// ==========================================
// 职责: 识别表头行 + SKU 列 + 可售库存列
// 规则: 先按表头名称匹配,失败回退固定列位置（B / I）
// 红线: 永不失败,回退结果通过行数/错误数由调用方核对
// ==========================================

use crate::config::ColumnRules;
use crate::domain::worksheet::Worksheet;
use serde::Serialize;
use tracing::{debug, warn};

// ==========================================
// ColumnLayout - 列定位结果
// ==========================================
// 行号/列号均为 1 起
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnLayout {
    pub header_row: usize,
    pub code_column: usize,
    pub quantity_column: usize,
    pub code_from_header: bool,     // false = 使用了回退列
    pub quantity_from_header: bool, // false = 使用了回退列
}

type HeaderPredicate<'a> = Box<dyn Fn(&str) -> bool + 'a>;

pub struct ColumnLocator {
    rules: ColumnRules,
}

impl ColumnLocator {
    pub fn new(rules: ColumnRules) -> Self {
        Self { rules }
    }

    /// 定位表头行与两个关键列
    pub fn locate(&self, sheet: &Worksheet) -> ColumnLayout {
        let header_row = self.detect_header_row(sheet);
        let headers = sheet.row_texts(header_row);

        let code_idx = find_column(&headers, &self.code_predicates());
        let quantity_idx = find_column(&headers, &self.quantity_predicates());

        let layout = ColumnLayout {
            header_row,
            code_column: code_idx.map_or(self.rules.code_fallback_column, |i| i + 1),
            quantity_column: quantity_idx.map_or(self.rules.quantity_fallback_column, |i| i + 1),
            code_from_header: code_idx.is_some(),
            quantity_from_header: quantity_idx.is_some(),
        };

        if !layout.code_from_header {
            warn!(
                sheet = %sheet.name,
                column = layout.code_column,
                "未识别到 SKU 列表头，使用回退列"
            );
        }
        if !layout.quantity_from_header {
            warn!(
                sheet = %sheet.name,
                column = layout.quantity_column,
                "未识别到可售库存列表头，使用回退列"
            );
        }
        debug!(sheet = %sheet.name, ?layout, "列定位完成");

        layout
    }

    /// 表头行: 前 N 行中第一个非空单元格数达到阈值的行,否则第 1 行
    pub fn detect_header_row(&self, sheet: &Worksheet) -> usize {
        let last = sheet.row_count().min(self.rules.header_scan_rows);
        (1..=last)
            .find(|&row| {
                let non_empty = sheet
                    .row_texts(row)
                    .iter()
                    .filter(|text| !text.is_empty())
                    .count();
                non_empty >= self.rules.header_min_cells
            })
            .unwrap_or(1)
    }

    // SKU: 等于标记 → 包含标记 → 本地化复合标签（含标记）
    fn code_predicates(&self) -> Vec<HeaderPredicate<'_>> {
        let token = self.rules.code_token.to_uppercase();
        let compound = self.rules.code_compound_label.to_uppercase();
        vec![
            Box::new({
                let token = token.clone();
                move |h: &str| h.to_uppercase() == token
            }),
            Box::new({
                let token = token.clone();
                move |h: &str| h.to_uppercase().contains(&token)
            }),
            Box::new(move |h: &str| {
                let upper = h.to_uppercase();
                !compound.is_empty() && upper.contains(&compound) && upper.contains(&token)
            }),
        ]
    }

    // 可售库存: 本地化短语（按配置顺序） → 英文标记（大小写不敏感）
    fn quantity_predicates(&self) -> Vec<HeaderPredicate<'_>> {
        let mut predicates: Vec<HeaderPredicate<'_>> = Vec::new();
        for phrase in self.rules.quantity_phrases.iter().filter(|p| !p.is_empty()) {
            predicates.push(Box::new(move |h: &str| h.contains(phrase.as_str())));
        }
        for token in self.rules.quantity_tokens.iter().filter(|t| !t.is_empty()) {
            let token = token.to_uppercase();
            predicates.push(Box::new(move |h: &str| h.to_uppercase().contains(&token)));
        }
        predicates
    }
}

impl Default for ColumnLocator {
    fn default() -> Self {
        Self::new(ColumnRules::default())
    }
}

/// 从左到右扫描,返回第一个命中任一谓词的列下标（0 起）
fn find_column(headers: &[String], predicates: &[HeaderPredicate<'_>]) -> Option<usize> {
    headers.iter().position(|header| {
        let h = header.trim();
        !h.is_empty() && predicates.iter().any(|p| p(h))
    })
}
