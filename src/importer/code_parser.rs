// ==========================================
// 库存盘点系统 - SKU 解析器
// ==========================================
// 文法: MODEL '-' COLOR SIZE
// 规则: 首个 '-' 分割；尺码按最长优先做大小写不敏感的后缀匹配
//       颜色与尺码之间的 '-' 视为分隔符（"A-RED-S" → RED / S）
// 已知歧义: 颜色本身以尺码词结尾（如 "...XL"）时会被当作尺码,
//          保持最长后缀规则,不做额外启发式修正
// ==========================================

use crate::domain::stock::{ParseFailure, ProductCode};
use crate::domain::types::{ParseFailureReason, Size};

pub struct CodeParser;

impl CodeParser {
    /// 解析一个 SKU
    ///
    /// # 返回
    /// - Ok(ProductCode): model/color 已 TRIM,raw 为去空白后的原串
    /// - Err(ParseFailure): 五种失败原因之一
    pub fn parse(&self, raw: &str) -> Result<ProductCode, ParseFailure> {
        let sku = raw.trim();
        let fail = |reason: ParseFailureReason| -> Result<ProductCode, ParseFailure> {
            Err(ParseFailure {
                raw: sku.to_string(),
                reason,
            })
        };

        if sku.is_empty() {
            return fail(ParseFailureReason::Empty);
        }

        // 首个 '-'；位于开头等同于型号为空
        let dash_idx = match sku.find('-') {
            Some(idx) if idx > 0 => idx,
            _ => return fail(ParseFailureReason::MissingDash),
        };

        let model = sku[..dash_idx].trim();
        let tail = sku[dash_idx + 1..].trim();
        if model.is_empty() || tail.is_empty() {
            return fail(ParseFailureReason::BadFormat);
        }

        let (size, split_at) = match match_size_suffix(tail) {
            Some(found) => found,
            None => return fail(ParseFailureReason::UnknownSize),
        };

        let color = tail[..split_at].trim().trim_end_matches('-').trim_end();
        if color.is_empty() {
            return fail(ParseFailureReason::MissingColor);
        }

        Ok(ProductCode {
            model: model.to_string(),
            color: color.to_string(),
            size,
            raw: sku.to_string(),
        })
    }
}

/// 最长优先的尺码后缀匹配,返回 (尺码, 颜色结束位置)
fn match_size_suffix(tail: &str) -> Option<(Size, usize)> {
    Size::MATCH_ORDER.into_iter().find_map(|size| {
        let token = size.as_str();
        let split_at = tail.len().checked_sub(token.len())?;
        if !tail.is_char_boundary(split_at) {
            return None;
        }
        tail[split_at..]
            .eq_ignore_ascii_case(token)
            .then_some((size, split_at))
    })
}
