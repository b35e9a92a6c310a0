//! 绘制属性定义
//!
//! 包含颜色、线型、阴影等视觉属性。

use serde::{Deserialize, Serialize};

/// RGBA颜色，与 CSS 颜色一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// 创建中的标注
    pub const GREEN_YELLOW: Color = Color::from_rgb_u32(0xADFF2F);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`
    pub const fn from_rgb_u32(value: u32) -> Self {
        let [_, r, g, b] = value.to_be_bytes();
        Self::rgb(r, g, b)
    }

    pub fn to_css(&self) -> String {
        match self.a {
            255 => format!("rgb({}, {}, {})", self.r, self.g, self.b),
            a => format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(a) / 255.0
            ),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// 线条样式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    /// 线宽（显示像素）
    pub width: f64,
    /// 虚线模式（为空表示实线）
    pub dash: Vec<f64>,
}

impl LineStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.dash = dash;
        self
    }

    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}

/// 阴影样式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    pub color: Color,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            color: Color::rgba(0, 0, 0, 128),
            offset_x: 1.0,
            offset_y: 1.0,
            blur: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_u32() {
        assert_eq!(Color::GREEN_YELLOW, Color::rgb(173, 255, 47));
        assert_eq!(Color::from_rgb_u32(0xFFFFFF), Color::WHITE);
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Color::GREEN_YELLOW.to_css(), "rgb(173, 255, 47)");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_css(), "rgba(0, 0, 0, 0.000)");
    }

    #[test]
    fn test_line_style_dash() {
        let style = LineStyle::solid(Color::WHITE, 1.0);
        assert!(!style.is_dashed());
        assert!(style.with_dash(vec![4.0, 4.0]).is_dashed());
    }
}
