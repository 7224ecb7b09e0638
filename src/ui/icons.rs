//! 图标字形
//!
//! x/o 使用预先画好的字形；空白字形在启动时按 o 字形的尺寸生成，内容全部透明（空格）。

use super::surface::Icon;
use crate::config::GlyphFont;
use crate::models::Cell;

const BLOCK_X: [&str; 5] = [
    "█   █",
    " █ █ ",
    "  █  ",
    " █ █ ",
    "█   █",
];

const BLOCK_O: [&str; 5] = [
    " ███ ",
    "█   █",
    "█   █",
    "█   █",
    " ███ ",
];

const ASCII_X: [&str; 3] = ["\\ /", " X ", "/ \\"];

const ASCII_O: [&str; 3] = ["/-\\", "| |", "\\-/"];

/// 多行字形
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    lines: Vec<String>,
    width: u16,
}

impl Glyph {
    pub fn from_art(art: &[&str]) -> Self {
        let width = art.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        Self {
            lines: art.iter().map(|l| l.to_string()).collect(),
            width,
        }
    }

    /// 与参考字形同尺寸的透明字形
    pub fn transparent_like(reference: &Glyph) -> Self {
        let row = " ".repeat(reference.width as usize);
        Self {
            lines: vec![row; reference.lines.len()],
            width: reference.width,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

/// 全部图标字形
#[derive(Debug, Clone)]
pub struct IconSet {
    x: Glyph,
    o: Glyph,
    blank: Glyph,
}

impl IconSet {
    pub fn new(font: GlyphFont) -> Self {
        let (x, o) = match font {
            GlyphFont::Block => (Glyph::from_art(&BLOCK_X), Glyph::from_art(&BLOCK_O)),
            GlyphFont::Ascii => (Glyph::from_art(&ASCII_X), Glyph::from_art(&ASCII_O)),
        };
        let blank = Glyph::transparent_like(&o);
        Self { x, o, blank }
    }

    /// 反色图标与普通图标共用字形，只在绘制时反转颜色
    pub fn glyph(&self, icon: Icon) -> &Glyph {
        match icon.mark() {
            Cell::Empty => &self.blank,
            Cell::X => &self.x,
            Cell::O => &self.o,
        }
    }

    /// 字形最大尺寸 (宽, 高)
    pub fn size(&self) -> (u16, u16) {
        (
            self.x.width().max(self.o.width()),
            self.x.height().max(self.o.height()),
        )
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(GlyphFont::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_matches_reference_size() {
        for font in [GlyphFont::Block, GlyphFont::Ascii] {
            let icons = IconSet::new(font);
            let blank = icons.glyph(Icon::Blank);
            let o = icons.glyph(Icon::O);
            assert_eq!(blank.width(), o.width());
            assert_eq!(blank.height(), o.height());
            assert!(blank.lines().iter().all(|l| l.trim().is_empty()));
        }
    }

    #[test]
    fn test_inverse_shares_glyph() {
        let icons = IconSet::default();
        assert_eq!(icons.glyph(Icon::X), icons.glyph(Icon::XInverse));
        assert_ne!(icons.glyph(Icon::X), icons.glyph(Icon::O));
        assert_eq!(icons.size(), (5, 5));
    }
}
