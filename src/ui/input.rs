//! 终端事件映射 (Input -> UiEvent)
//!
//! 鼠标左键点格子、数字键 1-9 按行选格子、q / Esc / Ctrl-C 关闭

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use super::actions::UiEvent;
use crate::models::{Coord, SIZE};

/// 终端事件来源
pub trait InputSource {
    /// `None` 阻塞读取；`Some(timeout)` 超时返回 `Ok(None)`
    fn next_event(&mut self, timeout: Option<Duration>) -> io::Result<Option<Event>>;
}

/// crossterm 事件队列
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn next_event(&mut self, timeout: Option<Duration>) -> io::Result<Option<Event>> {
        match timeout {
            None => event::read().map(Some),
            Some(timeout) => {
                if event::poll(timeout)? {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }
}

/// 预先排好的事件，按顺序读出
impl InputSource for VecDeque<Event> {
    fn next_event(&mut self, _timeout: Option<Duration>) -> io::Result<Option<Event>> {
        Ok(self.pop_front())
    }
}

/// 终端事件转换为界面事件，与格子无关的事件返回 None
pub fn to_ui_event(event: &Event, cell_areas: &[[Rect; SIZE]; SIZE]) -> Option<UiEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_event(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => hit_test(cell_areas, *column, *row).map(UiEvent::Click),
        _ => None,
    }
}

fn key_event(key: &KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiEvent::Close)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Close),
        KeyCode::Char(c @ '1'..='9') => Coord::from_index(c as usize - '1' as usize)
            .ok()
            .map(UiEvent::Click),
        _ => None,
    }
}

/// 屏幕坐标落在哪个格子里
pub fn hit_test(cell_areas: &[[Rect; SIZE]; SIZE], x: u16, y: u16) -> Option<Coord> {
    let position = Position::new(x, y);
    Coord::all().find(|c| cell_areas[c.row][c.col].contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> [[Rect; SIZE]; SIZE] {
        let mut areas = [[Rect::default(); SIZE]; SIZE];
        for c in Coord::all() {
            areas[c.row][c.col] = Rect::new(c.col as u16 * 10, c.row as u16 * 5, 10, 5);
        }
        areas
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_mouse_click_hits_cell() {
        let areas = grid();
        assert_eq!(
            to_ui_event(&click(25, 7), &areas),
            Some(UiEvent::Click(Coord::new(1, 2).unwrap()))
        );
        assert_eq!(to_ui_event(&click(31, 2), &areas), None);
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        let areas = grid();
        let release = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(to_ui_event(&release, &areas), None);
    }

    #[test]
    fn test_keys() {
        let areas = grid();
        assert_eq!(
            to_ui_event(&key(KeyCode::Char('q'), KeyModifiers::NONE), &areas),
            Some(UiEvent::Close)
        );
        assert_eq!(
            to_ui_event(&key(KeyCode::Esc, KeyModifiers::NONE), &areas),
            Some(UiEvent::Close)
        );
        assert_eq!(
            to_ui_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL), &areas),
            Some(UiEvent::Close)
        );
        assert_eq!(
            to_ui_event(&key(KeyCode::Char('1'), KeyModifiers::NONE), &areas),
            Some(UiEvent::Click(Coord::new(0, 0).unwrap()))
        );
        assert_eq!(
            to_ui_event(&key(KeyCode::Char('9'), KeyModifiers::NONE), &areas),
            Some(UiEvent::Click(Coord::new(2, 2).unwrap()))
        );
        assert_eq!(
            to_ui_event(&key(KeyCode::Char('0'), KeyModifiers::NONE), &areas),
            None
        );
        assert_eq!(
            to_ui_event(&key(KeyCode::Char('c'), KeyModifiers::NONE), &areas),
            None
        );
    }

    #[test]
    fn test_scripted_input_source() {
        let mut source: VecDeque<Event> = vec![Event::FocusGained].into();
        assert_eq!(source.next_event(None).unwrap(), Some(Event::FocusGained));
        assert_eq!(source.next_event(Some(Duration::ZERO)).unwrap(), None);
    }
}
