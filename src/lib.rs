//! # tictac
//!
//! 3x3 棋盘的终端界面：把棋盘状态映射为格子图标，获胜连线闪烁，
//! 以及把每格评估值（如智能体策略）显示为临时热力图。
//!
//! - [`models`] — 棋盘、格子、坐标、获胜连线
//! - [`ui`] — 显示面抽象、控制器 [`ui::Gui`]、ratatui 终端实现
//! - [`policy`] — 热力图归一化与配色
//! - [`color`] — RGB 颜色与通道换算
//! - [`i18n`] — 状态文本翻译表
//! - [`config`] — TOML 配置
//! - [`storage`] — 配置/数据目录与 TOML 读取
//! - [`error`] — 错误类型

pub mod color;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod policy;
pub mod storage;
pub mod ui;
