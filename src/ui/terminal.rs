//! ratatui + crossterm 实现的显示面

use std::fmt;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal, TerminalOptions, Viewport,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};
use tracing::{debug, info, warn};

use super::actions::UiEvent;
use super::icons::IconSet;
use super::input::{self, CrosstermInput, InputSource};
use super::state::Screen;
use super::surface::{FieldId, Icon, Surface};
use super::view;
use crate::color::Rgb;
use crate::config::GuiConfig;
use crate::error::GuiError;
use crate::models::{Coord, SIZE};

fn terminal_error(err: impl fmt::Display) -> GuiError {
    GuiError::Terminal(err.to_string())
}

/// 依次执行全部恢复步骤，返回第一个错误
fn first_error<E>(steps: impl IntoIterator<Item = Result<(), E>>) -> Result<(), E> {
    steps.into_iter().fold(Ok(()), |acc, step| acc.and(step))
}

/// 退出 raw 模式、备用屏幕与鼠标捕获，某一步失败时其余步骤照常执行
fn restore_tty() -> io::Result<()> {
    first_error([
        disable_raw_mode(),
        execute!(io::stdout(), DisableMouseCapture),
        execute!(io::stdout(), LeaveAlternateScreen),
    ])
}

/// 打开终端的过程中出错时，在 drop 时执行恢复
struct RestoreGuard<F: FnMut()> {
    restore: Option<F>,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    /// 打开成功，恢复交给 `close`
    fn disarm(mut self) {
        self.restore = None;
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.as_mut() {
            restore();
        }
    }
}

/// 终端显示面
pub struct TerminalSurface<B: Backend, I: InputSource> {
    terminal: Terminal<B>,
    input: I,
    screen: Screen,
    icons: IconSet,
    /// 上次绘制时各格子的位置
    cell_areas: [[Rect; SIZE]; SIZE],
    /// 关闭时是否恢复真实终端（raw 模式、备用屏幕、鼠标捕获）
    restore_terminal: bool,
    /// 收到尺寸变化，等待下一次绘制
    resized: bool,
}

impl TerminalSurface<CrosstermBackend<Stdout>, CrosstermInput> {
    /// 设置终端并创建显示面
    pub fn open(config: &GuiConfig) -> Result<Self, GuiError> {
        enable_raw_mode()?;
        let guard = RestoreGuard::new(|| {
            if let Err(err) = restore_tty() {
                warn!(%err, "failed to restore terminal");
            }
        });

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);

        let viewport = if config.window.fullscreen {
            Viewport::Fullscreen
        } else {
            Viewport::Fixed(Rect::new(0, 0, config.window.width, config.window.height))
        };
        let terminal = Terminal::with_options(backend, TerminalOptions { viewport })?;
        info!(
            fullscreen = config.window.fullscreen,
            width = config.window.width,
            height = config.window.height,
            "terminal surface opened"
        );

        let mut surface = Self::from_terminal(terminal, CrosstermInput, config);
        surface.restore_terminal = true;
        surface.terminal.clear().map_err(terminal_error)?;
        surface.refresh()?;

        guard.disarm();
        Ok(surface)
    }
}

impl<B: Backend, I: InputSource> TerminalSurface<B, I> {
    /// 使用现成的终端（测试中为 `TestBackend`），关闭时不动真实终端
    pub fn from_terminal(terminal: Terminal<B>, input: I, config: &GuiConfig) -> Self {
        let title = (!config.window.no_titlebar).then(|| config.window.title.clone());
        Self {
            terminal,
            input,
            screen: Screen::new(title),
            icons: IconSet::new(config.font),
            cell_areas: [[Rect::default(); SIZE]; SIZE],
            restore_terminal: false,
            resized: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn cell_area(&self, coord: Coord) -> Rect {
        self.cell_areas[coord.row][coord.col]
    }
}

impl<B, I> Surface for TerminalSurface<B, I>
where
    B: Backend,
    B::Error: fmt::Display,
    I: InputSource,
{
    fn update_cell_icon(&mut self, coord: Coord, icon: Icon) -> Result<(), GuiError> {
        self.screen.icons[coord.row][coord.col] = icon;
        Ok(())
    }

    fn update_cell_color(&mut self, coord: Coord, color: Rgb) -> Result<(), GuiError> {
        self.screen.colors[coord.row][coord.col] = color;
        Ok(())
    }

    fn update_text(&mut self, field: FieldId, text: &str, color: Rgb) -> Result<(), GuiError> {
        self.screen.fields.insert(field, (text.to_string(), color));
        Ok(())
    }

    fn update_player_icon(&mut self, slot: usize, icon: Icon) -> Result<(), GuiError> {
        if let Some(current) = self.screen.player_icons.get_mut(slot) {
            *current = icon;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), GuiError> {
        let Self {
            terminal,
            screen,
            icons,
            cell_areas,
            ..
        } = self;
        terminal
            .draw(|frame| {
                *cell_areas = view::render(frame, screen, icons);
            })
            .map_err(terminal_error)?;
        self.resized = false;
        Ok(())
    }

    fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<UiEvent>, GuiError> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            let remaining = deadline.map(|d| d.saturating_duration_since(Instant::now()));
            // 零超时只读积压事件，尺寸变化留给下一次绘制
            if self.resized && remaining != Some(Duration::ZERO) {
                self.refresh()?;
            }

            // 超时后仍读完已积压的事件，只有队列为空才返回
            let Some(event) = self.input.next_event(remaining)? else {
                return Ok(None);
            };

            if let Event::Resize(width, height) = event {
                debug!(width, height, "terminal resized");
                self.resized = true;
            }
            if let Some(ui_event) = input::to_ui_event(&event, &self.cell_areas) {
                return Ok(Some(ui_event));
            }
        }
    }

    fn close(&mut self) -> Result<(), GuiError> {
        let restored = if self.restore_terminal {
            info!("restoring terminal");
            restore_tty()
        } else {
            Ok(())
        };
        let cursor = self.terminal.show_cursor().map_err(terminal_error);
        restored.map_err(GuiError::from).and(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Gui;
    use crate::i18n::Catalog;
    use crate::models::{Board, Cell, Player};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::backend::TestBackend;
    use ratatui::style::{Color, Modifier};
    use std::collections::VecDeque;

    type TestSurface = TerminalSurface<TestBackend, VecDeque<Event>>;

    fn surface(events: Vec<Event>) -> TestSurface {
        let config = GuiConfig::default();
        let terminal = Terminal::new(TestBackend::new(96, 30)).unwrap();
        TerminalSurface::from_terminal(terminal, events.into(), &config)
    }

    fn buffer_text(surface: &TestSurface) -> String {
        let buffer = surface.terminal().backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            out.push('\n');
        }
        out
    }

    fn center(area: Rect) -> (u16, u16) {
        (area.x + area.width / 2, area.y + area.height / 2)
    }

    /// 区域内第一个画出字形笔画的位置
    fn glyph_stroke(surface: &TestSurface, area: Rect) -> Option<(u16, u16)> {
        let buffer = surface.terminal().backend().buffer();
        (area.y..area.y + area.height)
            .flat_map(|y| (area.x..area.x + area.width).map(move |x| (x, y)))
            .find(|&(x, y)| buffer.cell((x, y)).is_some_and(|c| c.symbol() == "█"))
    }

    #[test]
    fn test_refresh_draws_icons_and_text() {
        let mut s = surface(vec![]);
        let c = Coord::new(1, 1).unwrap();
        s.update_cell_icon(c, Icon::X).unwrap();
        s.update_text(FieldId::Title, "Neues Spiel", Rgb::TEXT).unwrap();
        s.refresh().unwrap();

        let text = buffer_text(&s);
        assert!(text.contains("Neues Spiel"));
        assert!(text.contains("█   █"));

        let area = s.cell_area(c);
        assert!(area.width > 0 && area.height > 0);
        assert!(glyph_stroke(&s, area).is_some());
        assert!(glyph_stroke(&s, s.cell_area(Coord::new(0, 0).unwrap())).is_none());
    }

    #[test]
    fn test_inverse_icon_is_reversed() {
        let mut s = surface(vec![]);
        let c = Coord::new(0, 2).unwrap();
        s.update_cell_icon(c, Icon::OInverse).unwrap();
        s.refresh().unwrap();

        let (x, y) = glyph_stroke(&s, s.cell_area(c)).unwrap();
        let buffer = s.terminal().backend().buffer();
        assert!(buffer.cell((x, y)).unwrap().modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_cell_background_color() {
        let mut s = surface(vec![]);
        let c = Coord::new(2, 0).unwrap();
        s.update_cell_color(c, Rgb::new(0, 255, 0)).unwrap();
        s.refresh().unwrap();

        let (x, y) = center(s.cell_area(c));
        let buffer = s.terminal().backend().buffer();
        assert_eq!(buffer.cell((x, y)).unwrap().bg, Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_mouse_click_maps_to_cell_after_refresh() {
        let mut s = surface(vec![]);
        s.refresh().unwrap();
        let target = Coord::new(2, 1).unwrap();
        let (x, y) = center(s.cell_area(target));
        s.input.push_back(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }));

        assert_eq!(s.poll_event(None).unwrap(), Some(UiEvent::Click(target)));
    }

    #[test]
    fn test_poll_skips_unrelated_events() {
        let mut s = surface(vec![
            Event::FocusGained,
            Event::Key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
        ]);
        assert_eq!(s.poll_event(None).unwrap(), Some(UiEvent::Close));
        assert_eq!(s.poll_event(Some(Duration::ZERO)).unwrap(), None);
    }

    #[test]
    fn test_titlebar_shown_when_enabled() {
        let mut config = GuiConfig::default();
        config.window.no_titlebar = false;
        let terminal = Terminal::new(TestBackend::new(96, 30)).unwrap();
        let mut s = TerminalSurface::from_terminal(terminal, VecDeque::new(), &config);
        s.refresh().unwrap();
        assert!(buffer_text(&s).contains("Tic Tac Toe"));
    }

    #[test]
    fn test_gui_drives_terminal_surface() {
        let mut gui = Gui::new(surface(vec![]), Catalog::german()).unwrap();
        let mut board = Board::new();
        for (i, cell) in [Cell::X, Cell::X, Cell::X].into_iter().enumerate() {
            board.set(Coord::from_index(i).unwrap(), cell);
        }
        gui.show_player_icon(Player::X).unwrap();
        gui.show_scores([1, 0]).unwrap();
        gui.render_board(&board, None).unwrap();
        gui.close().unwrap();
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_zero_timeout_poll_reads_past_unrelated_events() {
        let mut s = surface(vec![Event::FocusGained, key('5')]);
        assert_eq!(
            s.poll_event(Some(Duration::ZERO)).unwrap(),
            Some(UiEvent::Click(Coord::new(1, 1).unwrap()))
        );
        assert_eq!(s.poll_event(Some(Duration::ZERO)).unwrap(), None);
    }

    #[test]
    fn test_render_board_drains_clicks_behind_unrelated_events() {
        let mut gui = Gui::new(
            surface(vec![key('1'), Event::FocusGained, key('5')]),
            Catalog::german(),
        )
        .unwrap();
        gui.render_board(&Board::new(), None).unwrap();
        assert_eq!(gui.await_next_event(Some(Duration::ZERO)).unwrap(), None);
    }

    #[test]
    fn test_resize_while_draining_waits_for_next_refresh() {
        let mut s = surface(vec![Event::Resize(80, 24)]);
        assert_eq!(s.poll_event(Some(Duration::ZERO)).unwrap(), None);
        assert!(s.resized);

        s.refresh().unwrap();
        assert!(!s.resized);
    }

    #[test]
    fn test_resize_redrawn_before_blocking_read() {
        let mut s = surface(vec![Event::Resize(80, 24), key('1')]);
        assert_eq!(
            s.poll_event(None).unwrap(),
            Some(UiEvent::Click(Coord::new(0, 0).unwrap()))
        );
        assert!(!s.resized);
    }

    #[test]
    fn test_first_error_keeps_earliest_failure() {
        assert_eq!(first_error([Err("raw"), Ok(()), Err("screen")]), Err("raw"));
        assert_eq!(first_error([Ok(()), Err("screen")]), Err("screen"));
        assert_eq!(first_error::<&str>([Ok(()), Ok(())]), Ok(()));
    }

    #[test]
    fn test_restore_guard_runs_unless_disarmed() {
        use std::cell::Cell as Counter;

        let restored = Counter::new(0);
        {
            let _guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
        }
        assert_eq!(restored.get(), 1);

        let guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
        guard.disarm();
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_close_without_real_terminal() {
        let mut s = surface(vec![]);
        assert!(!s.restore_terminal);
        s.close().unwrap();
    }
}
