//! 2D视口相机
//!
//! 处理图像在视口中的平移、缩放和旋转。图像坐标与显示坐标都是 y 轴向下。

use crate::surface::TransformService;
use protractor_core::math::{Point2, Vector2};
use protractor_core::transform::Transform2D;

/// 2D相机
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// 视口中心对应的图像坐标
    pub center: Point2,

    /// 缩放级别（显示像素/图像像素）
    pub zoom: f64,

    /// 旋转角度（弧度，显示坐标下顺时针为正）
    pub rotation: f64,

    /// 视口宽度（像素）
    pub viewport_width: u32,

    /// 视口高度（像素）
    pub viewport_height: u32,

    /// 最小缩放
    pub min_zoom: f64,

    /// 最大缩放
    pub max_zoom: f64,
}

impl Camera2D {
    /// 创建新的相机
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            center: Point2::new(viewport_width as f64 / 2.0, viewport_height as f64 / 2.0),
            zoom: 1.0,
            rotation: 0.0,
            viewport_width,
            viewport_height,
            min_zoom: 0.01,
            max_zoom: 100.0,
        }
    }

    /// 平移相机（显示像素）
    pub fn pan(&mut self, delta: Vector2) {
        let image_delta = Transform2D::identity()
            .rotate(-self.rotation)
            .transform_point(&Point2::from(delta));
        self.center -= image_delta.coords / self.zoom;
    }

    /// 缩放相机（以指定显示点为中心）
    pub fn zoom_at(&mut self, display_point: Point2, factor: f64) {
        let Ok(before) = self.display_to_image(&display_point) else {
            return;
        };

        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);

        if let Ok(after) = self.display_to_image(&display_point) {
            self.center += before - after;
        }
    }
}

impl TransformService for Camera2D {
    fn display_transform(&self) -> Transform2D {
        Transform2D::identity()
            .translate(
                self.viewport_width as f64 / 2.0,
                self.viewport_height as f64 / 2.0,
            )
            .rotate(self.rotation)
            .scale(self.zoom, self.zoom)
            .translate(-self.center.x, -self.center.y)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protractor_core::math::approx_eq;

    #[test]
    fn test_default_camera_is_identity() {
        let camera = Camera2D::new(800, 600);
        let p = Point2::new(123.0, 45.0);
        let display = camera.image_to_display(&p);

        assert!(approx_eq(display.x, p.x));
        assert!(approx_eq(display.y, p.y));
    }

    #[test]
    fn test_coordinate_conversion() {
        let mut camera = Camera2D::new(800, 600);
        camera.zoom = 2.5;
        camera.rotation = 0.3;
        camera.center = Point2::new(10.0, 20.0);

        let image = Point2::new(100.0, 50.0);
        let display = camera.image_to_display(&image);
        let back = camera.display_to_image(&display).unwrap();

        assert!((image.x - back.x).abs() < 1e-9);
        assert!((image.y - back.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut camera = Camera2D::new(800, 600);
        let anchor = Point2::new(200.0, 100.0);
        let image_before = camera.display_to_image(&anchor).unwrap();

        camera.zoom_at(anchor, 2.0);
        let display_after = camera.image_to_display(&image_before);

        assert!((display_after.x - anchor.x).abs() < 1e-9);
        assert!((display_after.y - anchor.y).abs() < 1e-9);
    }

    #[test]
    fn test_pan_moves_content() {
        let mut camera = Camera2D::new(800, 600);
        let image = Point2::new(400.0, 300.0);
        camera.pan(Vector2::new(10.0, -5.0));

        let display = camera.image_to_display(&image);
        assert!(approx_eq(display.x, 410.0));
        assert!(approx_eq(display.y, 295.0));
    }
}
