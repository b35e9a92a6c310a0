//! 数学基础类型
//!
//! 基于 nalgebra 提供的向量和点类型的别名。
//! 图像坐标与显示坐标都使用同一套类型，由调用方区分坐标空间。

use nalgebra as na;

/// 2D点类型
pub type Point2 = na::Point2<f64>;

/// 2D向量类型
pub type Vector2 = na::Vector2<f64>;

/// 2D齐次变换矩阵
pub type Matrix3 = na::Matrix3<f64>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 判断两个2D点是否近似相等
#[inline]
pub fn points_approx_eq(a: &Point2, b: &Point2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// 四舍五入到指定小数位
pub fn round_to_decimal(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_decimal() {
        assert_eq!(round_to_decimal(33.333333, 2), 33.33);
        assert_eq!(round_to_decimal(45.005, 1), 45.0);
        assert_eq!(round_to_decimal(269.996, 2), 270.0);
        assert_eq!(round_to_decimal(90.0, 2), 90.0);
    }

    #[test]
    fn test_points_approx_eq() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(1.0 + 1e-12, 2.0);
        assert!(points_approx_eq(&a, &b));
        assert!(!points_approx_eq(&a, &Point2::new(1.1, 2.0)));
    }
}
