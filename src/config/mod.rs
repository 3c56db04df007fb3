// ==========================================
// 库存盘点系统 - 配置层
// ==========================================
// 职责: 列识别规则与报表文案的加载
// 存储: JSON 文件（可选）
// ==========================================

pub mod config_manager;
pub mod stock_check_config;

// 重导出核心配置类型
pub use config_manager::{ConfigManager, CONFIG_PATH_ENV};
pub use stock_check_config::{ColumnRules, ReportLabels, StockCheckConfig};
