//! 控制器操作 (Update)
//!
//! 棋盘渲染、闪烁与热力图序列、输入等待、计分与状态文本

use std::time::Duration;

use tracing::debug;

use super::actions::UiEvent;
use super::state::Gui;
use super::surface::{FieldId, Icon, Pacer, Surface};
use crate::color::Rgb;
use crate::error::GuiError;
use crate::i18n::{MessageKey, StatusText};
use crate::models::{Board, Coord, Player, WinningFields};
use crate::policy;

/// 闪烁的亮/灭周期数
pub const BLINK_CYCLES: usize = 2;
/// 闪烁每帧停留时间
pub const BLINK_HOLD: Duration = Duration::from_millis(300);
/// 热力图停留时间
pub const POLICY_HOLD: Duration = Duration::from_millis(2000);

impl<S: Surface, P: Pacer> Gui<S, P> {
    // ============ 棋盘 ============

    /// 按棋盘更新九个格子的图标，最后统一刷新一次
    pub fn render_board(
        &mut self,
        board: &Board,
        winning_fields: Option<&WinningFields>,
    ) -> Result<(), GuiError> {
        self.drain_stale_input()?;

        let surface = self.surface()?;
        for coord in Coord::all() {
            let highlighted = winning_fields.is_some_and(|fields| fields.contains(&coord));
            surface.update_cell_icon(coord, Icon::select(board.get(coord), highlighted))?;
        }
        surface.refresh()
    }

    /// 丢弃渲染前积压的输入，关闭请求保留给下一次输入等待
    fn drain_stale_input(&mut self) -> Result<(), GuiError> {
        let surface = self.surface()?;
        let mut close_seen = false;
        while let Some(event) = surface.poll_event(Some(Duration::ZERO))? {
            debug!(?event, "discarding stale input");
            if event == UiEvent::Close {
                close_seen = true;
                break;
            }
        }
        self.close_requested |= close_seen;
        Ok(())
    }

    // ============ 反馈动画 ============

    /// 获胜连线闪烁：亮、灭两轮，最后停在高亮画面
    pub fn blink(&mut self, board: &Board, winning_fields: &WinningFields) -> Result<(), GuiError> {
        debug!(cells = winning_fields.len(), "blinking winning line");
        for _ in 0..BLINK_CYCLES {
            self.render_board(board, Some(winning_fields))?;
            self.pacer.hold(BLINK_HOLD);
            self.render_board(board, None)?;
            self.pacer.hold(BLINK_HOLD);
        }
        self.render_board(board, Some(winning_fields))
    }

    /// 以热力图显示每格评估值，停留后恢复默认背景
    pub fn show_policy(&mut self, values: &[f64]) -> Result<(), GuiError> {
        self.surface()?;
        let colors = policy::heat_colors(values)?;
        debug!(?values, "showing policy heat-map");

        let surface = self.surface()?;
        for coord in Coord::all() {
            surface.update_cell_color(coord, colors[coord.index()])?;
        }
        surface.refresh()?;

        self.pacer.hold(POLICY_HOLD);

        let surface = self.surface()?;
        for coord in Coord::all() {
            surface.update_cell_color(coord, Rgb::CELL_DEFAULT)?;
        }
        surface.refresh()
    }

    // ============ 输入 ============

    /// `Some(timeout)` 轮询，可能返回 `None`；`None` 阻塞直到有事件并清除警告
    pub fn await_next_event(
        &mut self,
        timeout: Option<Duration>,
    ) -> Result<Option<UiEvent>, GuiError> {
        self.surface()?;
        if self.close_requested {
            return Ok(Some(UiEvent::Close));
        }

        let event = self.surface()?.poll_event(timeout)?;
        if timeout.is_none() {
            self.warn(StatusText::empty())?;
        }
        if event == Some(UiEvent::Close) {
            self.close_requested = true;
        }
        debug!(?event, ?timeout, "input");
        Ok(event)
    }

    /// 阻塞等待下一次点击或关闭
    pub fn listen_input(&mut self) -> Result<UiEvent, GuiError> {
        loop {
            if let Some(event) = self.await_next_event(None)? {
                return Ok(event);
            }
        }
    }

    // ============ 计分与状态 ============

    /// 分数按原样写入，不经过翻译表
    pub fn show_scores(&mut self, scores: [u32; 2]) -> Result<(), GuiError> {
        for (slot, score) in scores.into_iter().enumerate() {
            self.write(
                StatusText::Verbatim(score.to_string()),
                FieldId::PlayerScore(slot),
                Rgb::TEXT,
            )?;
        }
        Ok(())
    }

    pub fn show_new_game(&mut self) -> Result<(), GuiError> {
        self.write(MessageKey::NewGame.into(), FieldId::Title, Rgb::TEXT)?;
        self.write(StatusText::empty(), FieldId::Subtitle, Rgb::TEXT)
    }

    pub fn show_turn(&mut self, player: Player) -> Result<(), GuiError> {
        self.write(
            StatusText::WithSymbol(MessageKey::Turn, player.symbol()),
            FieldId::Subtitle,
            Rgb::TEXT,
        )
    }

    /// 有胜者时显示胜者并闪烁，平局时只渲染一次棋盘
    pub fn show_final_state(
        &mut self,
        board: &Board,
        winner: Option<Player>,
        winning_fields: &WinningFields,
    ) -> Result<(), GuiError> {
        match winner {
            Some(player) => {
                self.write(
                    StatusText::WithSymbol(MessageKey::Winner, player.symbol()),
                    FieldId::Title,
                    Rgb::TEXT,
                )?;
                self.write(StatusText::empty(), FieldId::Subtitle, Rgb::TEXT)?;
                self.blink(board, winning_fields)
            }
            None => {
                self.write(MessageKey::Draw.into(), FieldId::Title, Rgb::TEXT)?;
                self.write(StatusText::empty(), FieldId::Subtitle, Rgb::TEXT)?;
                self.render_board(board, None)
            }
        }
    }

    /// 玩家图标（计分栏）
    pub fn show_player_icon(&mut self, player: Player) -> Result<(), GuiError> {
        let surface = self.surface()?;
        surface.update_player_icon(player.slot(), Icon::select(player.to_cell(), false))?;
        surface.refresh()
    }

    pub(super) fn show_player_names(&mut self) -> Result<(), GuiError> {
        self.write(MessageKey::Player0.into(), FieldId::PlayerName(0), Rgb::TEXT)?;
        self.write(MessageKey::Player1.into(), FieldId::PlayerName(1), Rgb::TEXT)
    }

    /// 警告文字，总是红色
    pub fn warn(&mut self, text: StatusText) -> Result<(), GuiError> {
        self.write(text, FieldId::Warn, Rgb::ALERT)
    }

    /// 翻译后写入文本区域并刷新
    pub fn write(&mut self, text: StatusText, field: FieldId, color: Rgb) -> Result<(), GuiError> {
        self.surface()?;
        let rendered = self.catalog.render(&text);
        let surface = self.surface()?;
        surface.update_text(field, &rendered, color)?;
        surface.refresh()
    }
}
