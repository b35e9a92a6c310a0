//! 控制点放置
//!
//! 宿主的手势服务负责一个控制点的交互式放置：跟随指针移动控制点，
//! 直到用户确认或放弃。放置过程是一个挂起点，结果只会返回一次。

use crate::host::{InteractionType, PointerEvent};
use futures::future::LocalBoxFuture;
use protractor_core::handle::HandleKind;
use protractor_core::measurement::MeasurementId;
use serde::{Deserialize, Serialize};

/// 放置选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleCaptureOptions {
    /// 控制点不能移出图像
    pub prevent_handle_outside_image: bool,
    /// 控制点落在图像外时放弃放置
    pub delete_if_handle_outside_image: bool,
}

impl Default for HandleCaptureOptions {
    fn default() -> Self {
        Self {
            prevent_handle_outside_image: false,
            delete_if_handle_outside_image: true,
        }
    }
}

/// 一次放置请求
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    /// 触发放置的指针事件
    pub event: PointerEvent,
    pub tool_name: String,
    pub measurement: MeasurementId,
    pub handle: HandleKind,
    pub options: HandleCaptureOptions,
    pub interaction: InteractionType,
}

/// 放置结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// 控制点已放置
    Placed,
    /// 用户放弃
    Aborted,
}

impl CaptureOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, CaptureOutcome::Placed)
    }
}

/// 手势服务
pub trait HandleCapture {
    fn capture_handle(&self, request: CaptureRequest) -> LocalBoxFuture<'_, CaptureOutcome>;
}
