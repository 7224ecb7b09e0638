use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::i18n::Catalog;
use crate::storage::{read_toml, read_toml_or_default};

/// 固定窗口的最小尺寸（棋盘 + 计分栏）
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

/// 顶层配置，可从 TOML 加载
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub window: WindowConfig,
    pub font: GlyphFont,
    pub locale: LocaleConfig,
    pub log: LogConfig,
    pub demo: DemoConfig,
}

/// 窗口尺寸与装饰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u16,
    pub height: u16,
    pub fullscreen: bool,
    pub no_titlebar: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Tic Tac Toe".to_string(),
            width: 96,
            height: 30,
            fullscreen: false,
            no_titlebar: true,
        }
    }
}

/// 图标字形
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphFont {
    #[default]
    Block,
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub language: String,
    /// 覆盖内置翻译表的语言文件
    pub catalog: Option<PathBuf>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        LocaleConfig {
            language: "de".to_string(),
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// 每步之后显示提示热力图
    pub show_hints: bool,
}

impl GuiConfig {
    /// 从 TOML 文件加载配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: GuiConfig = read_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载配置，文件不存在时使用默认值
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let config: GuiConfig = read_toml_or_default(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.window.fullscreen {
            if self.window.width < MIN_WIDTH {
                return Err(ConfigError::Validation(format!(
                    "window.width must be >= {MIN_WIDTH}"
                )));
            }
            if self.window.height < MIN_HEIGHT {
                return Err(ConfigError::Validation(format!(
                    "window.height must be >= {MIN_HEIGHT}"
                )));
            }
        }
        if self.locale.catalog.is_none() && Catalog::builtin(&self.locale.language).is_none() {
            return Err(ConfigError::Validation(format!(
                "locale.language '{}' has no built-in catalog; set locale.catalog",
                self.locale.language
            )));
        }
        if EnvFilter::try_new(&self.log.level).is_err() {
            return Err(ConfigError::Validation(format!(
                "log.level '{}' is not a valid filter",
                self.log.level
            )));
        }
        Ok(())
    }

    /// 按语言配置构建翻译表
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        if let Some(path) = &self.locale.catalog {
            return Catalog::load(path);
        }
        Catalog::builtin(&self.locale.language).ok_or_else(|| {
            ConfigError::Validation(format!(
                "unknown locale.language '{}'",
                self.locale.language
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_is_valid() {
        let config = GuiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog().unwrap().locale(), "de");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GuiConfig = toml::from_str(
            "font = \"ascii\"\n\n[window]\nwidth = 120\n\n[demo]\nshow_hints = true\n",
        )
        .unwrap();
        assert_eq!(config.font, GlyphFont::Ascii);
        assert_eq!(config.window.width, 120);
        assert_eq!(config.window.height, 30);
        assert!(config.window.no_titlebar);
        assert!(config.demo.show_hints);
        assert_eq!(config.locale.language, "de");
    }

    #[test]
    fn test_validation_rejects_small_window() {
        let mut config = GuiConfig::default();
        config.window.width = 10;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.window.fullscreen = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_unknown_language() {
        let mut config = GuiConfig::default();
        config.locale.language = "fr".to_string();
        assert!(config.validate().is_err());

        config.locale.catalog = Some(PathBuf::from("fr.toml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(GuiConfig::load_or_default(&path).unwrap(), GuiConfig::default());

        fs::write(&path, "[locale]\nlanguage = \"en\"\n").unwrap();
        let config = GuiConfig::load(&path).unwrap();
        assert_eq!(config.catalog().unwrap().locale(), "en");

        fs::write(&path, "[log]\nlevel = \"tictac=loudest\"\n").unwrap();
        assert!(GuiConfig::load(&path).is_err());
    }
}
