//! 命中测试与交互
//!
//! 命中测试在显示坐标中进行，阈值与缩放无关。
//! 双击或长按命中某条记录时翻转其方向，下一次重算得到补角。

use crate::host::{PointerEvent, SurfaceId, ToolHost};
use crate::store::AnnotationStore;
use crate::tool::AngleTool;
use protractor_core::geometry::Segment;
use protractor_core::math::Point2;
use protractor_core::measurement::AngleMeasurement;
use protractor_render::TransformService;
use std::cell::RefCell;
use tracing::debug;

/// 点到任一射线的距离小于阈值即命中，不可见的记录不参与
pub fn point_near_tool(
    measurement: &AngleMeasurement,
    transform: &dyn TransformService,
    display_point: &Point2,
    threshold: f64,
) -> bool {
    if !measurement.visible {
        return false;
    }

    let [start, middle, end] = measurement
        .handles
        .positions()
        .map(|p| transform.image_to_display(&p));

    [Segment::new(start, middle), Segment::new(middle, end)]
        .iter()
        .any(|segment| segment.distance_to_point(display_point) < threshold)
}

impl AngleTool {
    /// 使用配置的命中距离
    pub fn is_near(
        &self,
        measurement: &AngleMeasurement,
        transform: &dyn TransformService,
        display_point: &Point2,
    ) -> bool {
        point_near_tool(measurement, transform, display_point, self.config().near_distance)
    }

    /// 翻转第一条命中记录的方向
    ///
    /// 返回是否处理了这次交互。
    pub fn toggle_orientation<S, H>(
        &self,
        store: &RefCell<S>,
        surface: SurfaceId,
        transform: &dyn TransformService,
        host: &H,
        display_point: &Point2,
    ) -> bool
    where
        S: AnnotationStore,
        H: ToolHost + ?Sized,
    {
        {
            let mut store = store.borrow_mut();
            let Some(state) = store.get_mut(surface, self.name()) else {
                return false;
            };
            let Some(m) = state
                .data
                .iter_mut()
                .find(|m| self.is_near(m, transform, display_point))
            else {
                return false;
            };

            m.toggle_clockwise();
            debug!(measurement = %m.id, clockwise = ?m.clockwise, "orientation toggled");
        }

        host.request_redraw(surface);
        true
    }

    /// 双击
    pub fn double_click<S, H>(
        &self,
        store: &RefCell<S>,
        transform: &dyn TransformService,
        host: &H,
        event: &PointerEvent,
    ) -> bool
    where
        S: AnnotationStore,
        H: ToolHost + ?Sized,
    {
        self.toggle_orientation(store, event.surface, transform, host, &event.display_point)
    }

    /// 长按，与双击相同
    pub fn touch_press<S, H>(
        &self,
        store: &RefCell<S>,
        transform: &dyn TransformService,
        host: &H,
        event: &PointerEvent,
    ) -> bool
    where
        S: AnnotationStore,
        H: ToolHost + ?Sized,
    {
        self.double_click(store, transform, host, event)
    }
}
