//! 视图层模块
//!
//! 把 [`Screen`] 画到终端上：左侧 3x3 棋盘，右侧标题、警告和计分栏

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

use super::icons::IconSet;
use super::state::Screen;
use super::surface::FieldId;
use crate::models::{Coord, SIZE};
use components::{render_cell, render_player_icon, render_text_field};

/// 渲染 UI，返回每个格子的屏幕区域（用于鼠标点击判定）
pub fn render(frame: &mut Frame, screen: &Screen, icons: &IconSet) -> [[Rect; SIZE]; SIZE] {
    let mut area = frame.area();

    if let Some(title) = &screen.title {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title.as_str());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        area = inner;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // 棋盘
            Constraint::Length(2),      // 间隔
            Constraint::Min(20),        // 计分栏
        ])
        .split(area);

    let cells = render_board(frame, screen, icons, columns[0]);
    render_score_column(frame, screen, icons, columns[2]);
    cells
}

fn render_board(
    frame: &mut Frame,
    screen: &Screen,
    icons: &IconSet,
    area: Rect,
) -> [[Rect; SIZE]; SIZE] {
    let thirds = [Constraint::Ratio(1, 3); SIZE];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(thirds)
        .split(area);

    let mut cells = [[Rect::default(); SIZE]; SIZE];
    for (r, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(thirds)
            .split(*row_area);
        for (c, cell_area) in cols.iter().enumerate() {
            cells[r][c] = *cell_area;
        }
    }

    for coord in Coord::all() {
        let icon = screen.icon(coord);
        render_cell(
            frame,
            cells[coord.row][coord.col],
            icons.glyph(icon),
            icon,
            screen.color(coord),
        );
    }
    cells
}

fn render_score_column(frame: &mut Frame, screen: &Screen, icons: &IconSet, area: Rect) {
    let (_, icon_height) = icons.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),              // 上方留白
            Constraint::Length(1),           // 标题
            Constraint::Length(1),           // 副标题
            Constraint::Length(3),           // 警告
            Constraint::Length(icon_height), // 玩家 1 图标
            Constraint::Length(1),           // 玩家 1 名称与分数
            Constraint::Length(1),
            Constraint::Length(icon_height), // 玩家 2 图标
            Constraint::Length(1),           // 玩家 2 名称与分数
            Constraint::Min(0),
        ])
        .split(area);

    let (text, color) = screen.field(FieldId::Title);
    render_text_field(frame, rows[1], text, color, true);
    let (text, color) = screen.field(FieldId::Subtitle);
    render_text_field(frame, rows[2], text, color, false);
    let (text, color) = screen.field(FieldId::Warn);
    render_text_field(frame, rows[3], text, color, false);

    for (slot, (icon_row, text_row)) in [(rows[4], rows[5]), (rows[7], rows[8])]
        .into_iter()
        .enumerate()
    {
        let icon = screen.player_icons[slot];
        render_player_icon(frame, icon_row, icons.glyph(icon), icon);

        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(6)])
            .split(text_row);
        let (text, color) = screen.field(FieldId::PlayerName(slot));
        render_text_field(frame, parts[0], text, color, false);
        let (text, color) = screen.field(FieldId::PlayerScore(slot));
        render_text_field(frame, parts[1], text, color, true);
    }
}
