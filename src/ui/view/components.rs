//! 通用 UI 组件
//!
//! 棋盘格子、文本区域、玩家图标

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::color::Rgb;
use crate::models::Cell;
use crate::ui::icons::Glyph;
use crate::ui::surface::Icon;

/// 棋子颜色
pub fn mark_color(mark: Cell) -> Color {
    match mark {
        Cell::X => Color::Rgb(0x1f, 0x4e, 0xa8),
        Cell::O => Color::Rgb(0xc2, 0x5a, 0x10),
        Cell::Empty => Color::Reset,
    }
}

/// 字形在区域内居中的位置
pub fn centered_glyph_area(area: Rect, glyph: &Glyph) -> Rect {
    let width = glyph.width().min(area.width);
    let height = glyph.height().min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn glyph_paragraph(glyph: &Glyph, style: Style) -> Paragraph<'_> {
    let lines: Vec<Line> = glyph
        .lines()
        .iter()
        .map(|l| Line::styled(l.as_str(), style))
        .collect();
    Paragraph::new(lines)
}

/// [组件] 棋盘格子：背景色 + 居中图标，反色图标反转前景与背景
pub fn render_cell(frame: &mut Frame, area: Rect, glyph: &Glyph, icon: Icon, background: Rgb) {
    let bg: Color = background.into();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut style = Style::default().fg(mark_color(icon.mark())).bg(bg);
    if icon.is_inverse() {
        style = style.add_modifier(Modifier::REVERSED);
    }
    frame.render_widget(glyph_paragraph(glyph, style), centered_glyph_area(inner, glyph));
}

/// [组件] 文本区域
pub fn render_text_field(frame: &mut Frame, area: Rect, text: &str, color: Rgb, bold: bool) {
    let mut style = Style::default().fg(color.into());
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// [组件] 玩家图标
pub fn render_player_icon(frame: &mut Frame, area: Rect, glyph: &Glyph, icon: Icon) {
    let style = Style::default().fg(mark_color(icon.mark()));
    frame.render_widget(glyph_paragraph(glyph, style), centered_glyph_area(area, glyph));
}
