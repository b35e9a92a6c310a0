//! 显示列表
//!
//! 把绘制调用记录为命令序列的 [`RenderSurface`] 实现。
//! 无界面宿主和测试都用它来检查绘制结果。

use crate::surface::{HandleStyle, LinkedTextBox, RenderSurface};
use protractor_core::geometry::AngleArc;
use protractor_core::math::Point2;
use protractor_core::properties::{LineStyle, ShadowStyle};
use serde::{Deserialize, Serialize};

/// 单个绘制命令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Save,
    Restore,
    Shadow(ShadowStyle),
    JoinedLines {
        points: Vec<Point2>,
        style: LineStyle,
    },
    Arc {
        arc: AngleArc,
        style: LineStyle,
    },
    Handles {
        points: Vec<Point2>,
        style: HandleStyle,
    },
    TextBox(LinkedTextBox),
}

/// 记录绘制命令的表面
#[derive(Debug, Clone)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    /// 每个字符的估算宽度（显示像素）
    char_width: f64,
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            char_width: 7.0,
        }
    }

    /// 指定字符宽度
    pub fn with_char_width(mut self, char_width: f64) -> Self {
        self.char_width = char_width;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// 所有弧线
    pub fn arcs(&self) -> impl Iterator<Item = &AngleArc> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Arc { arc, .. } => Some(arc),
            _ => None,
        })
    }

    /// 所有文本框
    pub fn text_boxes(&self) -> impl Iterator<Item = &LinkedTextBox> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::TextBox(text_box) => Some(text_box),
            _ => None,
        })
    }

    /// 所有绘制的控制点
    pub fn handle_points(&self) -> impl Iterator<Item = &Point2> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Handles { points, .. } => Some(points),
                _ => None,
            })
            .flatten()
    }

    /// 所有折线
    pub fn polylines(&self) -> impl Iterator<Item = (&[Point2], &LineStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::JoinedLines { points, style } => Some((points.as_slice(), style)),
            _ => None,
        })
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for DisplayList {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_shadow(&mut self, shadow: &ShadowStyle) {
        self.commands.push(DrawCommand::Shadow(*shadow));
    }

    fn draw_joined_lines(&mut self, points: &[Point2], style: &LineStyle) {
        self.commands.push(DrawCommand::JoinedLines {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    fn draw_arc(&mut self, arc: &AngleArc, style: &LineStyle) {
        self.commands.push(DrawCommand::Arc {
            arc: *arc,
            style: style.clone(),
        });
    }

    fn draw_handles(&mut self, handles: &[Point2], style: &HandleStyle) {
        self.commands.push(DrawCommand::Handles {
            points: handles.to_vec(),
            style: *style,
        });
    }

    fn text_box_width(&self, text: &str, padding: f64) -> f64 {
        text.chars().count() as f64 * self.char_width + padding * 2.0
    }

    fn draw_linked_text_box(&mut self, text_box: &LinkedTextBox) {
        self.commands.push(DrawCommand::TextBox(text_box.clone()));
    }
}
