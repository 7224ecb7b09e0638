//! 文本本地化
//!
//! 状态文本按 [`MessageKey`] 查表；缺失的翻译只记录警告，界面上显示英文原文。

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;
use crate::storage::read_toml;

/// 占位符，替换为玩家符号
const SYMBOL_PLACEHOLDER: &str = "{symbol}";

/// 状态文本键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    NewGame,
    Draw,
    Winner,
    Turn,
    InvalidMove,
    Player0,
    Player1,
}

impl MessageKey {
    pub const ALL: [MessageKey; 7] = [
        MessageKey::NewGame,
        MessageKey::Draw,
        MessageKey::Winner,
        MessageKey::Turn,
        MessageKey::InvalidMove,
        MessageKey::Player0,
        MessageKey::Player1,
    ];

    /// 语言文件中使用的键名
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::NewGame => "new_game",
            MessageKey::Draw => "draw",
            MessageKey::Winner => "winner",
            MessageKey::Turn => "turn",
            MessageKey::InvalidMove => "invalid_move",
            MessageKey::Player0 => "player0",
            MessageKey::Player1 => "player1",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// 英文原文，也是缺失翻译时的回退
    pub fn source_text(self) -> &'static str {
        match self {
            MessageKey::NewGame => "New game",
            MessageKey::Draw => "Draw",
            MessageKey::Winner => "Winner: {symbol}",
            MessageKey::Turn => "Turn: {symbol}",
            MessageKey::InvalidMove => "Field already taken",
            MessageKey::Player0 => "Player 1",
            MessageKey::Player1 => "Player 2",
        }
    }
}

/// 待显示的文本
#[derive(Debug, Clone, PartialEq)]
pub enum StatusText {
    Message(MessageKey),
    /// 带玩家符号的消息，如 "Winner: x"
    WithSymbol(MessageKey, char),
    /// 不查表，原样显示（分数、清空）
    Verbatim(String),
}

impl StatusText {
    pub fn empty() -> Self {
        StatusText::Verbatim(String::new())
    }
}

impl From<MessageKey> for StatusText {
    fn from(key: MessageKey) -> Self {
        StatusText::Message(key)
    }
}

/// 语言文件格式
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    messages: HashMap<String, String>,
}

/// 单一语言的翻译表
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    messages: HashMap<MessageKey, String>,
}

impl Catalog {
    /// 英文原文表，总是完整的
    pub fn english() -> Self {
        Self {
            locale: "en".to_string(),
            messages: MessageKey::ALL
                .into_iter()
                .map(|k| (k, k.source_text().to_string()))
                .collect(),
        }
    }

    /// 内置德语表
    pub fn german() -> Self {
        let entries = [
            (MessageKey::NewGame, "Neues Spiel"),
            (MessageKey::Draw, "Unentschieden"),
            (MessageKey::Winner, "Gewinner: {symbol}"),
            (MessageKey::Turn, "Am Zug: {symbol}"),
            (MessageKey::InvalidMove, "Feld ist schon belegt"),
            (MessageKey::Player0, "Spieler 1"),
            (MessageKey::Player1, "Spieler 2"),
        ];
        Self {
            locale: "de".to_string(),
            messages: entries
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
        }
    }

    /// 按语言代码取内置表
    pub fn builtin(language: &str) -> Option<Self> {
        match language {
            "de" => Some(Self::german()),
            "en" => Some(Self::english()),
            _ => None,
        }
    }

    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    /// 从 TOML 语言文件加载，未知键记录警告后忽略
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: CatalogFile = read_toml(path)?;
        let locale = file.locale.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let mut messages = HashMap::new();
        for (key, text) in file.messages {
            match MessageKey::from_key(&key) {
                Some(k) => {
                    messages.insert(k, text);
                }
                None => warn!(%key, path = %path.display(), "unknown message key in catalog"),
            }
        }
        Ok(Self { locale, messages })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn with(mut self, key: MessageKey, text: impl Into<String>) -> Self {
        self.messages.insert(key, text.into());
        self
    }

    /// 查表；缺失时回退到英文原文
    pub fn lookup(&self, key: MessageKey) -> Cow<'_, str> {
        match self.messages.get(&key) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => {
                warn!(
                    key = key.as_str(),
                    locale = %self.locale,
                    "translation for {:?} not found",
                    key.source_text()
                );
                Cow::Borrowed(key.source_text())
            }
        }
    }

    /// 生成最终显示的字符串
    pub fn render(&self, text: &StatusText) -> String {
        match text {
            StatusText::Message(key) => self.lookup(*key).into_owned(),
            StatusText::WithSymbol(key, symbol) => self
                .lookup(*key)
                .replace(SYMBOL_PLACEHOLDER, &symbol.to_string()),
            StatusText::Verbatim(s) => s.clone(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::german()
    }
}
