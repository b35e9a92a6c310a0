//! 几何计算
//!
//! 纯函数的向量运算：边长、余弦定理求角、叉积判定旋转方向、优角修正，
//! 以及点到线段的距离。所有函数都不持有状态。

use crate::error::AngleError;
use crate::math::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// 余弦值超出 [-1, 1] 时允许的数值误差
const COSINE_TOLERANCE: f64 = 1e-9;

/// 计算从 `a` 指向 `b` 的向量，并按像素间距缩放
///
/// `row_scale` 作用于 y 分量，`col_scale` 作用于 x 分量。
pub fn vector_between(a: &Point2, b: &Point2, row_scale: f64, col_scale: f64) -> Vector2 {
    Vector2::new((b.x - a.x) * col_scale, (b.y - a.y) * row_scale)
}

/// 向量长度（欧几里得范数）
#[inline]
pub fn length(v: &Vector2) -> f64 {
    v.norm()
}

/// 余弦定理：已知三边求 `side_c` 所对的角（度）
///
/// 任意边长为零，或余弦值超出容差范围时返回 [`AngleError::DegenerateGeometry`]。
pub fn angle_between(side_a: f64, side_b: f64, side_c: f64) -> Result<f64, AngleError> {
    if side_a <= 0.0 || side_b <= 0.0 {
        return Err(AngleError::DegenerateGeometry("zero-length side"));
    }

    let cosine = (side_a.powi(2) + side_b.powi(2) - side_c.powi(2)) / (2.0 * side_a * side_b);
    if !cosine.is_finite() || cosine.abs() > 1.0 + COSINE_TOLERANCE {
        return Err(AngleError::DegenerateGeometry("cosine out of range"));
    }

    Ok(cosine.clamp(-1.0, 1.0).acos().to_degrees())
}

/// 2D叉积，符号表示从 `v1` 到 `v2` 的旋转方向
#[inline]
pub fn cross_product(v1: &Vector2, v2: &Vector2) -> f64 {
    v1.x * v2.y - v1.y * v2.x
}

/// 重算时的方向判定：已有值保持不变，否则叉积为正即顺时针
pub fn resolve_orientation(cross: f64, existing: Option<bool>) -> bool {
    existing.unwrap_or(cross > 0.0)
}

/// 绘制时的方向判定
///
/// 与 [`resolve_orientation`] 不同，这里会参考上一次缓存的角度：
/// 缓存角度大于 180° 时取反判定。叉积为零时结果为 `false`。
pub fn resolve_display_orientation(cross: f64, cached_angle: Option<f64>, existing: Option<bool>) -> bool {
    if let Some(clockwise) = existing {
        return clockwise;
    }
    match cached_angle {
        Some(angle) if angle > 180.0 => cross < 0.0,
        _ => cross > 0.0,
    }
}

/// 方向标志与叉积符号矛盾时，显示角为 `360 - raw`
pub fn reflex_adjust(raw_angle: f64, clockwise: bool, cross: f64) -> f64 {
    let should_be_reflex = if clockwise { cross > 0.0 } else { cross < 0.0 };
    if should_be_reflex {
        360.0 - raw_angle
    } else {
        raw_angle
    }
}

/// 线段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 点到线段的最短距离，投影参数截断到 [0, 1]
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        let dir = self.end - self.start;
        let len_sq = dir.norm_squared();
        if len_sq <= 0.0 {
            return (point - self.start).norm();
        }
        let t = ((point - self.start).dot(&dir) / len_sq).clamp(0.0, 1.0);
        (point - (self.start + dir * t)).norm()
    }
}

/// 角度弧线（显示坐标，y 轴向下）
///
/// 角度使用 `atan2` 的弧度值；`anticlockwise` 与 canvas 的 `arc` 参数含义相同。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleArc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

impl AngleArc {
    /// 以顶点为圆心，从起始射线扫到结束射线
    pub fn between_rays(
        center: Point2,
        start_ray: &Vector2,
        end_ray: &Vector2,
        radius: f64,
        clockwise: bool,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle: start_ray.y.atan2(start_ray.x),
            end_angle: end_ray.y.atan2(end_ray.x),
            anticlockwise: !clockwise,
        }
    }

    /// 实际扫过的角度（度），范围 [0, 360)
    pub fn sweep_degrees(&self) -> f64 {
        let sweep = if self.anticlockwise {
            self.start_angle - self.end_angle
        } else {
            self.end_angle - self.start_angle
        };
        sweep.rem_euclid(TAU).to_degrees()
    }
}
