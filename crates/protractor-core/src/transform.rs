//! 图像到显示的仿射变换
//!
//! 分量与 canvas 的 `setTransform(a, b, c, d, e, f)` 相同：
//!
//! ```text
//! x' = a·x + c·y + e
//! y' = b·x + d·y + f
//! ```
//!
//! `translate`、`rotate`、`scale` 与 canvas 上下文的调用顺序一致，
//! 后调用的先作用于点。标签定位时通过 [`Transform2D::invert`] 换算回图像坐标。

use crate::error::AngleError;
use crate::math::{Matrix3, Point2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    matrix: Matrix3,
}

impl Transform2D {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// 由 canvas 顺序的六个分量构造
    pub fn from_components(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            a,   c,   e,
            b,   d,   f,
            0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// canvas 顺序的六个分量
    pub fn components(&self) -> [f64; 6] {
        let m = &self.matrix;
        [m[(0, 0)], m[(1, 0)], m[(0, 1)], m[(1, 1)], m[(0, 2)], m[(1, 2)]]
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        self.multiply(&Self::from_components(1.0, 0.0, 0.0, 1.0, dx, dy))
    }

    /// 旋转（弧度，y 轴向下时顺时针为正）
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        self.multiply(&Self::from_components(cos, sin, -sin, cos, 0.0, 0.0))
    }

    pub fn scale(self, sx: f64, sy: f64) -> Self {
        self.multiply(&Self::from_components(sx, 0.0, 0.0, sy, 0.0, 0.0))
    }

    /// `other` 先作用，`self` 后作用
    pub fn multiply(&self, other: &Transform2D) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    pub fn transform_point(&self, point: &Point2) -> Point2 {
        let [a, b, c, d, e, f] = self.components();
        Point2::new(a * point.x + c * point.y + e, b * point.x + d * point.y + f)
    }

    /// 逆变换；缩放为零等退化情况返回 [`AngleError::SingularTransform`]
    pub fn invert(&self) -> Result<Self, AngleError> {
        self.matrix
            .try_inverse()
            .map(|matrix| Self { matrix })
            .ok_or(AngleError::SingularTransform)
    }

    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points_approx_eq};

    #[test]
    fn test_components_follow_canvas_order() {
        let t = Transform2D::from_components(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(t.components(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        // x' = 1·1 + 3·1 + 5, y' = 2·1 + 4·1 + 6
        let p = t.transform_point(&Point2::new(1.0, 1.0));
        assert!(points_approx_eq(&p, &Point2::new(9.0, 12.0)));
    }

    #[test]
    fn test_last_call_applies_first() {
        let t = Transform2D::identity().translate(10.0, 20.0).scale(2.0, 2.0);
        let p = t.transform_point(&Point2::new(5.0, 5.0));

        assert!(approx_eq(p.x, 20.0));
        assert!(approx_eq(p.y, 30.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let t = Transform2D::identity().rotate(std::f64::consts::FRAC_PI_2);
        let p = t.transform_point(&Point2::new(1.0, 0.0));

        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 1.0));
    }

    #[test]
    fn test_invert_restores_image_point() {
        let t = Transform2D::identity()
            .translate(400.0, 300.0)
            .rotate(0.3)
            .scale(1.5, 1.5)
            .translate(-250.0, -120.0);

        let inv = t.invert().unwrap();
        let p = Point2::new(123.0, -45.0);
        let restored = inv.transform_point(&t.transform_point(&p));

        assert!((restored.x - p.x).abs() < 1e-9);
        assert!((restored.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_invert_singular() {
        let t = Transform2D::identity().scale(0.0, 1.0);
        assert_eq!(t.invert(), Err(AngleError::SingularTransform));
        assert_eq!(Transform2D::default(), Transform2D::identity());
    }
}
