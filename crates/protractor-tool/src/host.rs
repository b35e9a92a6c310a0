//! 宿主接口
//!
//! 工具通过这里的类型与宿主交互：绘图表面标识、指针事件、
//! 重绘请求和事件通知。

use protractor_core::math::Point2;
use protractor_core::measurement::AngleMeasurement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 绘图表面标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// 交互类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionType {
    Mouse,
    Touch,
}

/// 指针事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub surface: SurfaceId,
    /// 图像坐标
    pub image_point: Point2,
    /// 显示坐标
    pub display_point: Point2,
}

/// 测量完成通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementCompleted {
    pub tool_name: String,
    pub surface: SurfaceId,
    pub measurement: AngleMeasurement,
}

/// 工具发出的事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolEvent {
    MeasurementCompleted(MeasurementCompleted),
}

impl ToolEvent {
    /// 事件名称
    pub fn name(&self) -> &'static str {
        match self {
            ToolEvent::MeasurementCompleted(_) => "measurement-completed",
        }
    }
}

/// 宿主回调
pub trait ToolHost {
    /// 请求重绘指定表面
    fn request_redraw(&self, surface: SurfaceId);

    /// 向外部监听者发出事件
    fn emit(&self, surface: SurfaceId, event: ToolEvent);
}
