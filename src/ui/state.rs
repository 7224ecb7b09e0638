//! 界面状态定义 (Model)
//!
//! [`Gui`] 控制器持有唯一的显示面；[`Screen`] 是终端显示面当前画面的数据。

use std::collections::HashMap;

use tracing::{info, warn};

use super::surface::{FieldId, Icon, Pacer, Surface, ThreadPacer};
use crate::color::Rgb;
use crate::error::GuiError;
use crate::i18n::Catalog;
use crate::models::{Coord, SIZE};

/// 界面控制器
///
/// 所有渲染、停顿和输入等待都在调用者线程上顺序执行。`close` 之后任何操作都返回
/// [`GuiError::SurfaceClosed`]；未关闭就被丢弃时在 `Drop` 中关闭。
pub struct Gui<S: Surface, P: Pacer = ThreadPacer> {
    pub(super) surface: Option<S>,
    pub(super) pacer: P,
    pub(super) catalog: Catalog,
    /// 已收到关闭请求（可能是在清理旧输入时读到的）
    pub(super) close_requested: bool,
}

impl<S: Surface> Gui<S> {
    /// 创建控制器并显示新游戏界面
    pub fn new(surface: S, catalog: Catalog) -> Result<Self, GuiError> {
        Self::with_pacer(surface, ThreadPacer, catalog)
    }
}

impl<S: Surface, P: Pacer> Gui<S, P> {
    pub fn with_pacer(surface: S, pacer: P, catalog: Catalog) -> Result<Self, GuiError> {
        info!(locale = catalog.locale(), "opening board display");
        let mut gui = Self {
            surface: Some(surface),
            pacer,
            catalog,
            close_requested: false,
        };
        gui.show_player_names()?;
        gui.show_new_game()?;
        Ok(gui)
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_some()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 释放显示面，只能调用一次
    pub fn close(&mut self) -> Result<(), GuiError> {
        let mut surface = self.surface.take().ok_or(GuiError::SurfaceClosed)?;
        info!("closing board display");
        surface.close()
    }

    pub(super) fn surface(&mut self) -> Result<&mut S, GuiError> {
        self.surface.as_mut().ok_or(GuiError::SurfaceClosed)
    }
}

impl<S: Surface, P: Pacer> Drop for Gui<S, P> {
    fn drop(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            if let Err(err) = surface.close() {
                warn!(%err, "failed to close display on teardown");
            }
        }
    }
}

/// 终端画面数据
#[derive(Debug, Clone)]
pub struct Screen {
    pub icons: [[Icon; SIZE]; SIZE],
    pub colors: [[Rgb; SIZE]; SIZE],
    pub fields: HashMap<FieldId, (String, Rgb)>,
    pub player_icons: [Icon; 2],
    /// 外框标题，无标题栏时为 None
    pub title: Option<String>,
}

impl Screen {
    pub fn new(title: Option<String>) -> Self {
        Self {
            icons: [[Icon::Blank; SIZE]; SIZE],
            colors: [[Rgb::CELL_DEFAULT; SIZE]; SIZE],
            fields: HashMap::new(),
            player_icons: [Icon::Blank; 2],
            title,
        }
    }

    pub fn icon(&self, coord: Coord) -> Icon {
        self.icons[coord.row][coord.col]
    }

    pub fn color(&self, coord: Coord) -> Rgb {
        self.colors[coord.row][coord.col]
    }

    /// 文本及颜色，未设置时为空白
    pub fn field(&self, field: FieldId) -> (&str, Rgb) {
        self.fields
            .get(&field)
            .map(|(text, color)| (text.as_str(), *color))
            .unwrap_or(("", Rgb::TEXT))
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(None)
    }
}
