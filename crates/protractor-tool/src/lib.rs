//! Protractor 角度测量工具
//!
//! 用户依次放置起点、顶点和终点，工具持续计算并绘制夹角、
//! 方向弧线和带引线的标签。
//!
//! # 组成
//!
//! - [`placement`]：放置状态机，等待宿主的手势服务逐个放置控制点
//! - [`render`]：每帧绘制流程，负责方向的延迟确定和角度的节流重算
//! - [`interaction`]：命中测试，双击/长按翻转方向
//! - [`store`]、[`host`]、[`capture`]：宿主需要提供的协作接口
//!
//! 工具是单线程的。存储以 `RefCell` 共享，借用不会跨越挂起点。

pub mod capture;
pub mod config;
pub mod host;
pub mod interaction;
pub mod placement;
pub mod render;
pub mod store;
pub mod throttle;
pub mod tool;

#[cfg(test)]
mod testing;

pub use capture::{CaptureOutcome, CaptureRequest, HandleCapture, HandleCaptureOptions};
pub use config::AngleToolConfig;
pub use host::{InteractionType, MeasurementCompleted, PointerEvent, SurfaceId, ToolEvent, ToolHost};
pub use interaction::point_near_tool;
pub use placement::{PlacementOutcome, PlacementState};
pub use render::FrameContext;
pub use store::{AnnotationStore, MemoryStore, ToolState};
pub use throttle::{RecomputeRequest, RecomputeScheduler, Throttle};
pub use tool::{AngleTool, ANGLE_TOOL_NAME};
