//! 角度测量记录
//!
//! 一条记录对应一个角度标注：三个控制点、一个标签控制点，
//! 以及缓存的角度值。
//!
//! # 失效规则
//!
//! - 任一控制点位置或 `clockwise` 改变时，`invalidated` 置为 true
//! - 只有在 `angle` 重新计算成功后，`invalidated` 才会清除
//! - `clockwise` 首次确定后保持不变，只能由用户显式翻转

use crate::error::AngleError;
use crate::geometry::{
    angle_between, cross_product, length, reflex_adjust, resolve_orientation, vector_between,
};
use crate::handle::{AngleHandles, HandleKind};
use crate::math::{round_to_decimal, Point2};
use crate::properties::Color;
use crate::spacing::PixelSpacing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 全局测量ID生成器
static MEASUREMENT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 默认保留的小数位
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// 度数符号
const DEGREE_SIGN: char = '\u{00B0}';

/// 测量记录唯一标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeasurementId(pub u64);

impl MeasurementId {
    /// 创建新的测量ID
    pub fn new() -> Self {
        Self(MEASUREMENT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MeasurementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 角度测量记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleMeasurement {
    /// 唯一标识符
    pub id: MeasurementId,

    /// 是否可见
    pub visible: bool,

    /// 是否正在创建
    pub active: bool,

    /// 指定颜色（None 时由工具配色决定）
    pub color: Option<Color>,

    /// 缓存的角度是否过期
    pub invalidated: bool,

    /// 方向标志，None 表示尚未确定
    pub clockwise: Option<bool>,

    /// 控制点
    pub handles: AngleHandles,

    /// 缓存的角度（度）
    pub angle: Option<f64>,
}

impl AngleMeasurement {
    /// 在指定图像坐标处创建新记录，三个控制点重合
    pub fn new(initial_point: Point2) -> Self {
        Self {
            id: MeasurementId::new(),
            visible: true,
            active: true,
            color: None,
            invalidated: true,
            clockwise: None,
            handles: AngleHandles::colocated(initial_point),
            angle: None,
        }
    }

    /// 移动控制点
    pub fn set_handle_position(&mut self, kind: HandleKind, position: Point2) {
        let handle = self.handles.get_mut(kind);
        if handle.position != position {
            handle.position = position;
            self.invalidated = true;
        }
    }

    /// 用户手动移动标签，此后不再自动定位
    pub fn move_label(&mut self, position: Point2) {
        self.handles.label.position = Some(position);
        self.handles.label.has_moved = true;
    }

    /// 翻转方向标志
    ///
    /// 尚未确定方向时，翻转后的值为 `true`。
    pub fn toggle_clockwise(&mut self) {
        self.clockwise = Some(!self.clockwise.unwrap_or(false));
        self.invalidated = true;
    }

    /// 重新计算角度
    ///
    /// 边长使用像素间距校正后的图像单位。计算失败时清除旧角度，
    /// 记录保持失效，等待下一次重算。
    pub fn update_cached_stats(
        &mut self,
        spacing: &PixelSpacing,
        decimal_places: u32,
    ) -> Result<f64, AngleError> {
        let (row, col) = (spacing.row_scale(), spacing.column_scale());
        let [start, middle, end] = self.handles.positions();

        let side_a = vector_between(&start, &middle, row, col);
        let side_b = vector_between(&middle, &end, row, col);
        let side_c = vector_between(&start, &end, row, col);

        let raw = match angle_between(length(&side_a), length(&side_b), length(&side_c)) {
            Ok(raw) => raw,
            Err(err) => {
                self.angle = None;
                self.invalidated = true;
                return Err(err);
            }
        };

        // 叉积决定旋转方向
        let cross = cross_product(&side_a, &side_b);
        let clockwise = resolve_orientation(cross, self.clockwise);
        self.clockwise = Some(clockwise);

        let mut angle = round_to_decimal(reflex_adjust(raw, clockwise, cross), decimal_places);
        if angle >= 360.0 {
            angle -= 360.0;
        }

        self.angle = Some(angle);
        self.invalidated = false;
        Ok(angle)
    }

    /// 标签文本，尚无角度时为 None
    pub fn label_text(&self, spacing: &PixelSpacing) -> Option<String> {
        self.angle
            .map(|angle| format!("{}{}{}", angle, DEGREE_SIGN, spacing.label_suffix()))
    }
}

/// 创建新的测量记录
pub fn create_record(initial_point: Point2) -> AngleMeasurement {
    AngleMeasurement::new(initial_point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn record(start: (f64, f64), middle: (f64, f64), end: (f64, f64)) -> AngleMeasurement {
        let mut m = create_record(Point2::new(start.0, start.1));
        m.set_handle_position(HandleKind::Middle, Point2::new(middle.0, middle.1));
        m.set_handle_position(HandleKind::End, Point2::new(end.0, end.1));
        m
    }

    #[test]
    fn test_create_record() {
        let p = Point2::new(12.0, 34.0);
        let m = create_record(p);

        assert!(m.visible);
        assert!(m.active);
        assert!(m.invalidated);
        assert_eq!(m.clockwise, None);
        assert_eq!(m.angle, None);
        assert_eq!(m.handles.positions(), [p, p, p]);
        assert!(m.handles.middle.is_active());
        assert!(!m.handles.label.has_moved);
        assert_ne!(m.id, create_record(p).id);
    }

    #[test]
    fn test_set_handle_position_invalidates() {
        let mut m = record((0.0, 1.0), (0.0, 0.0), (1.0, 0.0));
        m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();
        assert!(!m.invalidated);

        // 相同位置不会失效
        m.set_handle_position(HandleKind::End, Point2::new(1.0, 0.0));
        assert!(!m.invalidated);

        m.set_handle_position(HandleKind::End, Point2::new(2.0, 0.0));
        assert!(m.invalidated);
    }

    #[test]
    fn test_recompute_resolves_orientation_from_cross_product() {
        // 图像坐标下叉积为正，重算路径直接判定为顺时针
        let mut m = record((0.0, 1.0), (0.0, 0.0), (1.0, 0.0));
        let angle = m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();

        assert_eq!(m.clockwise, Some(true));
        assert!(approx_eq(angle, 270.0));
        assert!(!m.invalidated);
    }

    #[test]
    fn test_recompute_keeps_existing_orientation() {
        let mut m = record((0.0, 1.0), (0.0, 0.0), (1.0, 0.0));
        m.clockwise = Some(false);
        let angle = m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();

        assert_eq!(m.clockwise, Some(false));
        assert!(approx_eq(angle, 90.0));
    }

    #[test]
    fn test_toggle_gives_complement() {
        let mut m = record((0.0, 0.0), (10.0, 0.0), (20.0, 7.0));
        m.clockwise = Some(false);
        let before = m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();

        m.toggle_clockwise();
        assert!(m.invalidated);
        assert_eq!(m.clockwise, Some(true));

        let after = m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();
        assert!((before + after - 360.0).abs() < 0.011);
    }

    #[test]
    fn test_collinear_points() {
        let mut m = record((0.0, 0.0), (10.0, 0.0), (20.0, 0.0));
        let angle = m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();

        assert!(approx_eq(angle, 180.0));
        assert_eq!(m.clockwise, Some(false));
    }

    #[test]
    fn test_degenerate_keeps_invalidated() {
        let mut m = create_record(Point2::new(5.0, 5.0));
        let result = m.update_cached_stats(&PixelSpacing::unknown(), 2);

        assert!(matches!(result, Err(AngleError::DegenerateGeometry(_))));
        assert!(m.invalidated);
        assert_eq!(m.angle, None);
        assert_eq!(m.clockwise, None);
    }

    #[test]
    fn test_degenerate_after_valid_angle_clears_cache() {
        let mut m = record((0.0, 1.0), (0.0, 0.0), (1.0, 0.0));
        m.clockwise = Some(false);
        m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();
        assert_eq!(m.angle, Some(90.0));

        // 终点拖到顶点上
        m.set_handle_position(HandleKind::End, Point2::new(0.0, 0.0));
        assert!(m.update_cached_stats(&PixelSpacing::unknown(), 2).is_err());

        assert_eq!(m.angle, None);
        assert!(m.invalidated);
        assert_eq!(m.clockwise, Some(false));
        assert_eq!(m.label_text(&PixelSpacing::unknown()), None);
    }

    #[test]
    fn test_reflex_rounding_wraps_to_zero() {
        // 原始角约 5.7e-5°，取优角后四舍五入得到 360
        let mut m = record((0.0, 0.0), (1000.0, 0.0), (0.0, 0.001));
        m.clockwise = Some(true);
        let angle = m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();

        assert_eq!(angle, 0.0);
        assert_eq!(m.angle, Some(0.0));
    }

    #[test]
    fn test_angle_stays_in_range() {
        let triangles = [
            ((0.0, 1.0), (0.0, 0.0), (1.0, 0.0)),
            ((0.0, 0.0), (10.0, 0.0), (20.0, 7.0)),
            ((0.0, 0.0), (10.0, 0.0), (20.0, 0.0)),
            ((0.0, 0.0), (10.0, 0.0), (5.0, 0.0)),
            ((0.0, 0.0), (1000.0, 0.0), (0.0, 0.001)),
            ((0.0, 0.0), (1000.0, 0.0), (0.0, -0.001)),
            ((3.0, -4.0), (-2.0, 6.0), (-8.0, -1.0)),
            ((-5.0, 5.0), (0.0, 0.0), (5.0, 5.0)),
        ];

        for (start, middle, end) in triangles {
            for clockwise in [false, true] {
                let mut m = record(start, middle, end);
                m.clockwise = Some(clockwise);
                let angle = m.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();
                assert!(
                    (0.0..360.0).contains(&angle),
                    "{angle} out of range for {start:?} {middle:?} {end:?} clockwise={clockwise}"
                );
            }
        }
    }

    #[test]
    fn test_anisotropic_spacing() {
        // 列间距 2 使水平边加长，角度随之变化
        let mut m = record((0.0, 1.0), (0.0, 0.0), (1.0, 1.0));
        m.clockwise = Some(false);
        let iso = m.update_cached_stats(&PixelSpacing::new(1.0, 1.0), 2).unwrap();
        assert!(approx_eq(iso, 45.0));

        m.invalidated = true;
        let aniso = m.update_cached_stats(&PixelSpacing::new(1.0, 2.0), 2).unwrap();
        assert!(approx_eq(aniso, 63.43));
    }

    #[test]
    fn test_label_text() {
        let mut m = record((0.0, 1.0), (0.0, 0.0), (1.0, 0.0));
        assert_eq!(m.label_text(&PixelSpacing::unknown()), None);

        m.clockwise = Some(false);
        m.update_cached_stats(&PixelSpacing::new(0.5, 0.5), 2).unwrap();
        assert_eq!(m.label_text(&PixelSpacing::new(0.5, 0.5)).unwrap(), "90°");
        assert_eq!(
            m.label_text(&PixelSpacing::new(0.0, 0.5)).unwrap(),
            "90° (isotropic)"
        );
    }

    #[test]
    fn test_record_serializes_unresolved_orientation() {
        let m = create_record(Point2::new(1.0, 2.0));
        let json = serde_json::to_value(&m).unwrap();

        assert_eq!(json["clockwise"], serde_json::Value::Null);
        assert_eq!(json["invalidated"], serde_json::Value::Bool(true));

        let back: AngleMeasurement = serde_json::from_value(json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_move_label_disables_auto_placement() {
        let mut m = create_record(Point2::origin());
        m.move_label(Point2::new(3.0, 3.0));
        assert!(m.handles.label.has_moved);
        assert_eq!(m.handles.label.position, Some(Point2::new(3.0, 3.0)));
    }
}
