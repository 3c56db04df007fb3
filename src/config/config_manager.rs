// ==========================================
// 库存盘点系统 - 配置管理器
// ==========================================
// 职责: 配置文件定位与加载
// 优先级: 显式路径 > 环境变量 > 用户配置目录 > 内置默认值
// ==========================================

use crate::config::stock_check_config::StockCheckConfig;
use crate::importer::error::{ImportError, ImportResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "STOCK_CHECK_CONFIG";

/// 用户配置目录下的子目录名
const CONFIG_DIR_NAME: &str = "stock-check";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行指定的配置文件（必须存在）
    ///
    /// # 返回
    /// - Ok(StockCheckConfig): 加载成功或使用默认值
    /// - Err: 指定的文件不可读、JSON 格式错误
    pub fn load(explicit_path: Option<&Path>) -> ImportResult<StockCheckConfig> {
        if let Some(path) = explicit_path {
            return Self::load_from_file(path);
        }

        // 允许通过环境变量显式指定配置路径（便于调试/测试/CI）
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::load_from_file(Path::new(trimmed));
            }
        }

        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        debug!("未找到配置文件，使用内置默认配置");
        Ok(StockCheckConfig::default())
    }

    /// 从 JSON 文件读取配置
    pub fn load_from_file(path: &Path) -> ImportResult<StockCheckConfig> {
        let raw = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::parse(&raw).map_err(|e| ImportError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), "配置文件加载完成");
        Ok(config)
    }

    /// 解析 JSON 配置文本（缺失字段取默认值）
    pub fn parse(raw: &str) -> Result<StockCheckConfig, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(StockCheckConfig::default());
        }
        serde_json::from_str(raw)
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{ "report": {{ "title": "Stock Check" }}, "columns": {{ "code_token": "CODE" }} }}"#
        )
        .unwrap();

        let config = ConfigManager::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.report.title, "Stock Check");
        assert_eq!(config.columns.code_token, "CODE");
        assert_eq!(config.columns.quantity_fallback_column, 9);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = ConfigManager::load(Some(Path::new("/nonexistent/stock-check.json")));
        assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{{ not json").unwrap();

        let result = ConfigManager::load_from_file(temp_file.path());
        assert!(matches!(result, Err(ImportError::ConfigParseError { .. })));
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(ConfigManager::parse("  ").unwrap(), StockCheckConfig::default());
    }
}
