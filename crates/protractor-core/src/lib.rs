//! Protractor 核心几何引擎
//!
//! 提供角度测量所需的向量运算、测量记录以及坐标变换。
//!
//! # 架构设计
//!
//! - `geometry`: 纯函数，余弦定理、叉积、优角修正
//! - `measurement`: 测量记录及其缓存角度
//! - `handle`: 控制点位置与交互标志
//! - `transform`: 图像坐标与显示坐标之间的仿射变换
//!
//! # 示例
//!
//! ```rust
//! use protractor_core::prelude::*;
//!
//! let mut record = create_record(Point2::new(0.0, 1.0));
//! record.set_handle_position(HandleKind::Middle, Point2::new(0.0, 0.0));
//! record.set_handle_position(HandleKind::End, Point2::new(1.0, 0.0));
//! record.clockwise = Some(false);
//!
//! let angle = record.update_cached_stats(&PixelSpacing::unknown(), 2).unwrap();
//! assert_eq!(angle, 90.0);
//! ```

pub mod error;
pub mod geometry;
pub mod handle;
pub mod math;
pub mod measurement;
pub mod properties;
pub mod spacing;
pub mod transform;

pub use error::AngleError;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::error::AngleError;
    pub use crate::geometry::{AngleArc, Segment};
    pub use crate::handle::{AngleHandles, HandleFlags, HandleKind, HandleState, LabelHandle};
    pub use crate::math::{Point2, Vector2};
    pub use crate::measurement::{create_record, AngleMeasurement, MeasurementId};
    pub use crate::properties::{Color, LineStyle, ShadowStyle};
    pub use crate::spacing::PixelSpacing;
    pub use crate::transform::Transform2D;
}
