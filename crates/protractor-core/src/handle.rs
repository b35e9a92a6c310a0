//! 控制点（Handle）
//!
//! 控制点是测量记录上可拖动的点。位置是纯几何值，
//! 交互标志（激活、高亮、移动中）单独组合在状态里。

use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 角度测量的三个控制点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// 第一条射线上的点
    Start,
    /// 顶点
    Middle,
    /// 第二条射线上的点
    End,
}

impl HandleKind {
    pub const ALL: [HandleKind; 3] = [HandleKind::Start, HandleKind::Middle, HandleKind::End];

    pub fn name(&self) -> &'static str {
        match self {
            HandleKind::Start => "start",
            HandleKind::Middle => "middle",
            HandleKind::End => "end",
        }
    }
}

/// 控制点交互标志
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleFlags {
    /// 正在放置或拖动
    pub active: bool,
    /// 悬停高亮
    pub highlight: bool,
    /// 移动中（可用于隐藏控制点）
    pub moving: bool,
}

/// 控制点状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleState {
    /// 位置（图像坐标）
    pub position: Point2,
    pub flags: HandleFlags,
}

impl HandleState {
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            flags: HandleFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: HandleFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_active(&self) -> bool {
        self.flags.active
    }
}

/// 标签控制点
///
/// 位置在首次自动定位之前为 `None`。用户手动移动后 `has_moved` 置位，
/// 此后不再自动定位。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelHandle {
    pub position: Option<Point2>,
    pub active: bool,
    pub has_moved: bool,
    pub moves_independently: bool,
    pub drawn_independently: bool,
    pub allowed_outside_image: bool,
    pub has_bounding_box: bool,
}

impl Default for LabelHandle {
    fn default() -> Self {
        Self {
            position: None,
            active: false,
            has_moved: false,
            moves_independently: false,
            drawn_independently: true,
            allowed_outside_image: true,
            has_bounding_box: true,
        }
    }
}

/// 一条角度测量的全部控制点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleHandles {
    pub start: HandleState,
    pub middle: HandleState,
    pub end: HandleState,
    pub label: LabelHandle,
}

impl AngleHandles {
    /// 三个控制点重合于同一点
    pub fn colocated(point: Point2) -> Self {
        let highlighted = HandleFlags {
            highlight: true,
            ..Default::default()
        };
        Self {
            start: HandleState::new(point).with_flags(highlighted),
            middle: HandleState::new(point).with_flags(HandleFlags {
                active: true,
                ..highlighted
            }),
            end: HandleState::new(point).with_flags(highlighted),
            label: LabelHandle::default(),
        }
    }

    pub fn get(&self, kind: HandleKind) -> &HandleState {
        match kind {
            HandleKind::Start => &self.start,
            HandleKind::Middle => &self.middle,
            HandleKind::End => &self.end,
        }
    }

    pub fn get_mut(&mut self, kind: HandleKind) -> &mut HandleState {
        match kind {
            HandleKind::Start => &mut self.start,
            HandleKind::Middle => &mut self.middle,
            HandleKind::End => &mut self.end,
        }
    }

    /// 按 start、middle、end 顺序返回位置
    pub fn positions(&self) -> [Point2; 3] {
        [self.start.position, self.middle.position, self.end.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colocated_handles() {
        let p = Point2::new(4.0, 7.0);
        let handles = AngleHandles::colocated(p);

        assert_eq!(handles.positions(), [p, p, p]);
        assert!(handles.middle.is_active());
        assert!(!handles.start.is_active());
        assert!(!handles.end.is_active());
        assert!(HandleKind::ALL.iter().all(|k| handles.get(*k).flags.highlight));
        assert_eq!(handles.label.position, None);
        assert!(handles.label.drawn_independently);
        assert!(handles.label.allowed_outside_image);
        assert!(!handles.label.has_moved);
    }

    #[test]
    fn test_get_mut() {
        let mut handles = AngleHandles::colocated(Point2::origin());
        handles.get_mut(HandleKind::End).position = Point2::new(1.0, 1.0);
        assert_eq!(handles.end.position, Point2::new(1.0, 1.0));
        assert_eq!(HandleKind::Middle.name(), "middle");
    }
}
