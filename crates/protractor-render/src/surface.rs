//! 宿主绘图能力
//!
//! 工具只依赖这里的 trait，不依赖具体的绘图引擎。
//! 所有绘制参数都使用显示坐标。

use protractor_core::error::AngleError;
use protractor_core::geometry::AngleArc;
use protractor_core::math::Point2;
use protractor_core::properties::{Color, LineStyle, ShadowStyle};
use protractor_core::transform::Transform2D;
use serde::{Deserialize, Serialize};

/// 坐标变换服务
pub trait TransformService {
    /// 图像坐标到显示坐标的变换
    fn display_transform(&self) -> Transform2D;

    /// 图像坐标转显示坐标
    fn image_to_display(&self, point: &Point2) -> Point2 {
        self.display_transform().transform_point(point)
    }

    /// 显示坐标转图像坐标
    fn display_to_image(&self, point: &Point2) -> Result<Point2, AngleError> {
        Ok(self.display_transform().invert()?.transform_point(point))
    }
}

impl TransformService for Transform2D {
    fn display_transform(&self) -> Transform2D {
        *self
    }
}

/// 控制点绘制样式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleStyle {
    pub color: Color,
    /// 控制点半径，None 时由宿主决定
    pub radius: Option<f64>,
    pub line_width: f64,
}

/// 带引线的文本框
///
/// 宿主负责从文本框引一条线到最近的锚点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedTextBox {
    /// 文本框位置（显示坐标）
    pub position: Point2,
    pub text: String,
    /// 引线的候选锚点（显示坐标）
    pub anchors: Vec<Point2>,
    pub color: Color,
    pub line_width: f64,
    pub x_offset: f64,
    pub y_centered: bool,
}

/// 绘图表面
pub trait RenderSurface {
    /// 保存绘图状态
    fn save(&mut self) {}

    /// 恢复绘图状态
    fn restore(&mut self) {}

    fn set_shadow(&mut self, shadow: &ShadowStyle);

    /// 绘制首尾相连的折线
    fn draw_joined_lines(&mut self, points: &[Point2], style: &LineStyle);

    fn draw_arc(&mut self, arc: &AngleArc, style: &LineStyle);

    fn draw_handles(&mut self, handles: &[Point2], style: &HandleStyle);

    /// 文本框宽度（含内边距）
    fn text_box_width(&self, text: &str, padding: f64) -> f64;

    fn draw_linked_text_box(&mut self, text_box: &LinkedTextBox);
}

/// 在独立的绘图状态中执行绘制
pub fn draw_scoped<S, F>(surface: &mut S, draw: F)
where
    S: RenderSurface + ?Sized,
    F: FnOnce(&mut S),
{
    surface.save();
    draw(surface);
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use protractor_core::math::approx_eq;

    #[test]
    fn test_transform_service_for_transform() {
        let t = Transform2D::identity().translate(5.0, -5.0).scale(2.0, 2.0);
        let display = t.image_to_display(&Point2::new(1.0, 1.0));
        assert!(approx_eq(display.x, 7.0));
        assert!(approx_eq(display.y, -3.0));

        let image = t.display_to_image(&display).unwrap();
        assert!((image.x - 1.0).abs() < 1e-9);
        assert!((image.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_to_image_singular() {
        let t = Transform2D::identity().scale(0.0, 0.0);
        assert_eq!(
            t.display_to_image(&Point2::origin()),
            Err(AngleError::SingularTransform)
        );
    }
}
