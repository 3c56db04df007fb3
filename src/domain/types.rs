// ==========================================
// 库存盘点系统 - 领域类型定义
// ==========================================
// 职责: 尺码枚举 / 错误原因枚举
// 红线: 尺码是唯一的封闭词表,型号与颜色不做白名单校验
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 尺码 (Size)
// ==========================================
// 声明顺序即报表列顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "XXL")]
    Xxl,
    #[serde(rename = "3XL")]
    Xl3,
    #[serde(rename = "4XL")]
    Xl4,
}

impl Size {
    /// 报表列顺序（S..4XL）
    pub const ALL: [Size; 7] = [
        Size::S,
        Size::M,
        Size::L,
        Size::Xl,
        Size::Xxl,
        Size::Xl3,
        Size::Xl4,
    ];

    /// 后缀匹配顺序（最长优先）
    ///
    /// 必须先试 XL 再试 L，否则 "...XL" 会被拆成颜色 "...X" + 尺码 L。
    pub const MATCH_ORDER: [Size; 7] = [
        Size::Xl4,
        Size::Xl3,
        Size::Xxl,
        Size::Xl,
        Size::L,
        Size::M,
        Size::S,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
            Size::Xl3 => "3XL",
            Size::Xl4 => "4XL",
        }
    }

    /// 在报表列中的位置（0 起）
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// SKU 解析失败原因 (Parse Failure Reason)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseFailureReason {
    Empty,        // 去空白后为空
    MissingDash,  // 无 '-' 或型号为空
    BadFormat,    // 型号或尾段为空
    UnknownSize,  // 尾段不以任何尺码结尾
    MissingColor, // 去掉尺码后颜色为空
}

impl ParseFailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseFailureReason::Empty => "empty",
            ParseFailureReason::MissingDash => "missing-dash",
            ParseFailureReason::BadFormat => "bad-format",
            ParseFailureReason::UnknownSize => "unknown-size",
            ParseFailureReason::MissingColor => "missing-color",
        }
    }
}

impl fmt::Display for ParseFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 导入错误原因 (Ingest Error Reason)
// ==========================================
// 文件级 + 行级,全部为非致命错误
// 序列化格式: 与 CSV 错误报告一致的 kebab-case 代码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestErrorReason {
    NoWorksheet,    // 文件内无工作表
    UnreadableFile, // 文件无法打开/解码
    Parse(ParseFailureReason),
}

impl IngestErrorReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestErrorReason::NoWorksheet => "no-worksheet",
            IngestErrorReason::UnreadableFile => "unreadable-file",
            IngestErrorReason::Parse(reason) => reason.as_str(),
        }
    }

    pub fn is_file_level(&self) -> bool {
        !matches!(self, IngestErrorReason::Parse(_))
    }
}

impl From<ParseFailureReason> for IngestErrorReason {
    fn from(reason: ParseFailureReason) -> Self {
        IngestErrorReason::Parse(reason)
    }
}

impl Serialize for IngestErrorReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for IngestErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_display_order() {
        let codes: Vec<&str> = Size::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(codes, vec!["S", "M", "L", "XL", "XXL", "3XL", "4XL"]);
    }

    #[test]
    fn test_size_match_order_is_reverse_of_display() {
        let mut reversed = Size::ALL;
        reversed.reverse();
        assert_eq!(reversed, Size::MATCH_ORDER);
    }

    #[test]
    fn test_size_index_matches_position() {
        for (idx, size) in Size::ALL.iter().enumerate() {
            assert_eq!(size.index(), idx);
        }
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(IngestErrorReason::NoWorksheet.to_string(), "no-worksheet");
        assert_eq!(
            IngestErrorReason::from(ParseFailureReason::MissingColor).to_string(),
            "missing-color"
        );
        assert!(IngestErrorReason::UnreadableFile.is_file_level());
        assert!(!IngestErrorReason::Parse(ParseFailureReason::Empty).is_file_level());
    }
}
