//! UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): Gui 控制器与终端画面数据
//! - View (view/): 纯函数，将画面数据映射为终端 UI
//! - Intent (actions.rs / input.rs): 终端事件转化为语义化的 UiEvent
//! - Update (logic.rs): 棋盘渲染、闪烁、热力图、输入等待、状态文本
//!
//! 控制器只依赖 [`Surface`] 抽象，终端实现见 [`TerminalSurface`]。

pub mod actions;
pub mod icons;
pub mod input;
pub mod logic;
pub mod state;
pub mod surface;
pub mod terminal;
pub mod view;

// Re-export for convenience
pub use actions::UiEvent;
pub use logic::{BLINK_CYCLES, BLINK_HOLD, POLICY_HOLD};
pub use state::{Gui, Screen};
pub use surface::{FieldId, Icon, Pacer, Surface, ThreadPacer};
pub use terminal::TerminalSurface;
