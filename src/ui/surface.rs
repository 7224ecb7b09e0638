//! 显示面抽象
//!
//! 控制器只通过 [`Surface`] 操作界面，终端实现见 [`super::terminal`]。

use std::time::Duration;

use super::actions::UiEvent;
use crate::color::Rgb;
use crate::error::GuiError;
use crate::models::{Cell, Coord};

/// 格子图标
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Icon {
    #[default]
    Blank,
    X,
    XInverse,
    O,
    OInverse,
}

impl Icon {
    /// 空格永远是空白图标；有子且在获胜连线上时用反色图标
    pub fn select(cell: Cell, highlighted: bool) -> Icon {
        match (cell.label(), highlighted) {
            ('x', false) => Icon::X,
            ('x', true) => Icon::XInverse,
            ('o', false) => Icon::O,
            ('o', true) => Icon::OInverse,
            _ => Icon::Blank,
        }
    }

    pub fn is_inverse(self) -> bool {
        matches!(self, Icon::XInverse | Icon::OInverse)
    }

    /// 图标对应的棋子
    pub fn mark(self) -> Cell {
        match self {
            Icon::Blank => Cell::Empty,
            Icon::X | Icon::XInverse => Cell::X,
            Icon::O | Icon::OInverse => Cell::O,
        }
    }
}

/// 文本区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Title,
    Subtitle,
    Warn,
    PlayerName(usize),
    PlayerScore(usize),
}

/// 界面工具包需要提供的操作
pub trait Surface {
    fn update_cell_icon(&mut self, coord: Coord, icon: Icon) -> Result<(), GuiError>;

    fn update_cell_color(&mut self, coord: Coord, color: Rgb) -> Result<(), GuiError>;

    fn update_text(&mut self, field: FieldId, text: &str, color: Rgb) -> Result<(), GuiError>;

    /// 计分栏旁的玩家图标
    fn update_player_icon(&mut self, slot: usize, icon: Icon) -> Result<(), GuiError>;

    /// 把之前的所有更新一次性画到屏幕上
    fn refresh(&mut self) -> Result<(), GuiError>;

    /// `None` 阻塞直到有事件；`Some(timeout)` 超时返回 `Ok(None)`
    fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<UiEvent>, GuiError>;

    fn close(&mut self) -> Result<(), GuiError>;
}

/// 动画中的停顿
pub trait Pacer {
    fn hold(&mut self, duration: Duration);
}

/// 阻塞当前线程
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn hold(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_empty_is_always_blank() {
        assert_eq!(Icon::select(Cell::Empty, false), Icon::Blank);
        assert_eq!(Icon::select(Cell::Empty, true), Icon::Blank);
    }

    #[test]
    fn test_select_marks() {
        assert_eq!(Icon::select(Cell::X, false), Icon::X);
        assert_eq!(Icon::select(Cell::X, true), Icon::XInverse);
        assert_eq!(Icon::select(Cell::O, false), Icon::O);
        assert_eq!(Icon::select(Cell::O, true), Icon::OInverse);
        assert!(Icon::OInverse.is_inverse());
        assert_eq!(Icon::XInverse.mark(), Cell::X);
    }
}
