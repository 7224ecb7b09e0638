//! RGB 颜色值及通道换算

use std::fmt;

use ratatui::style::Color;

/// 24 位 RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// 热力图中接近零的格子
    pub const NEUTRAL_GRAY: Rgb = Rgb::new(0x99, 0x99, 0x99);
    /// 格子默认背景
    pub const CELL_DEFAULT: Rgb = Rgb::new(0xff, 0xff, 0xff);
    /// 普通文字
    pub const TEXT: Rgb = Rgb::new(0xff, 0xff, 0xff);
    /// 警告文字
    pub const ALERT: Rgb = Rgb::new(0xff, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn green(intensity: f64) -> Self {
        Self::new(0, channel_byte(intensity), 0)
    }

    pub fn red(intensity: f64) -> Self {
        Self::new(channel_byte(intensity), 0, 0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// `clamp(round(q * 255), 0, 255)`，NaN 视为 0
pub fn channel_byte(q: f64) -> u8 {
    if q.is_nan() {
        return 0;
    }
    (q * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_byte_rounds_and_clamps() {
        assert_eq!(channel_byte(1.0), 255);
        assert_eq!(channel_byte(0.5), 128);
        assert_eq!(channel_byte(0.0), 0);
        assert_eq!(channel_byte(-0.3), 0);
        assert_eq!(channel_byte(1.7), 255);
        assert_eq!(channel_byte(f64::NAN), 0);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Rgb::NEUTRAL_GRAY.to_string(), "#999999");
        assert_eq!(Rgb::ALERT.to_string(), "#ff0000");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_into_ratatui_color() {
        let color: Color = Rgb::green(1.0).into();
        assert_eq!(color, Color::Rgb(0, 255, 0));
    }
}
