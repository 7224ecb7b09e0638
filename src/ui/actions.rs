//! 输入事件定义 (Intent)
//!
//! 终端事件转化为明确的语义化事件

use crate::models::Coord;

/// 用户操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// 点击格子
    Click(Coord),
    /// 关闭窗口，游戏循环应就此结束
    Close,
}
