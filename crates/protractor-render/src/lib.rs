//! Protractor 绘制接口
//!
//! 宿主绘图能力的抽象，以及两个现成的实现。
//!
//! # 组成
//!
//! - [`RenderSurface`]：折线、弧线、控制点、带引线文本框
//! - [`TransformService`]：图像坐标与显示坐标互转
//! - [`Camera2D`]：平移/缩放/旋转视口
//! - [`DisplayList`]：记录绘制命令，供无界面宿主和测试使用

pub mod camera;
pub mod display_list;
pub mod surface;

pub use camera::Camera2D;
pub use display_list::{DisplayList, DrawCommand};
pub use surface::{draw_scoped, HandleStyle, LinkedTextBox, RenderSurface, TransformService};
