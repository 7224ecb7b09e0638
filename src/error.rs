use std::path::PathBuf;

/// 界面操作错误
#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error("board must be 3x3, got {rows}x{cols}")]
    InvalidBoardShape { rows: usize, cols: usize },

    #[error("coordinate ({row}, {col}) is outside the 3x3 board")]
    InvalidCoordinate { row: usize, col: usize },

    #[error("policy needs 9 values, got {0}")]
    InvalidPolicyLength(usize),

    #[error("display surface already closed")]
    SurfaceClosed,

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 配置与语言文件加载错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
