//! 测试用的宿主替身

use crate::capture::{CaptureOutcome, CaptureRequest, HandleCapture};
use crate::host::{SurfaceId, ToolEvent, ToolHost};
use crate::store::{AnnotationStore, MemoryStore};
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use protractor_core::handle::HandleKind;
use protractor_core::math::Point2;
use protractor_core::measurement::{create_record, AngleMeasurement};
use std::cell::RefCell;
use std::collections::VecDeque;

/// 记录重绘请求和事件
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub redraws: RefCell<Vec<SurfaceId>>,
    pub events: RefCell<Vec<(SurfaceId, ToolEvent)>>,
}

impl ToolHost for RecordingHost {
    fn request_redraw(&self, surface: SurfaceId) {
        self.redraws.borrow_mut().push(surface);
    }

    fn emit(&self, surface: SurfaceId, event: ToolEvent) {
        self.events.borrow_mut().push((surface, event));
    }
}

/// 按脚本立即完成放置：`Some(p)` 把控制点移到 p，`None` 表示放弃
pub(crate) struct ScriptedCapture<'a> {
    store: &'a RefCell<MemoryStore>,
    script: RefCell<VecDeque<Option<Point2>>>,
    pub requests: RefCell<Vec<CaptureRequest>>,
}

impl<'a> ScriptedCapture<'a> {
    pub fn new(
        store: &'a RefCell<MemoryStore>,
        script: impl IntoIterator<Item = Option<Point2>>,
    ) -> Self {
        Self {
            store,
            script: RefCell::new(script.into_iter().collect()),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl HandleCapture for ScriptedCapture<'_> {
    fn capture_handle(&self, request: CaptureRequest) -> LocalBoxFuture<'_, CaptureOutcome> {
        let step = self.script.borrow_mut().pop_front().flatten();
        let outcome = match step {
            Some(position) => {
                if let Some(m) = self.store.borrow_mut().measurement_mut(
                    request.event.surface,
                    &request.tool_name,
                    request.measurement,
                ) {
                    m.set_handle_position(request.handle, position);
                }
                CaptureOutcome::Placed
            }
            None => CaptureOutcome::Aborted,
        };
        self.requests.borrow_mut().push(request);
        future::ready(outcome).boxed_local()
    }
}

/// 由测试手动决定放置结果
#[derive(Debug, Default)]
pub(crate) struct ChannelCapture {
    pending: RefCell<VecDeque<oneshot::Sender<CaptureOutcome>>>,
}

impl ChannelCapture {
    /// 完成最早的一次放置
    pub fn resolve(&self, outcome: CaptureOutcome) -> bool {
        match self.pending.borrow_mut().pop_front() {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }
}

impl HandleCapture for ChannelCapture {
    fn capture_handle(&self, _request: CaptureRequest) -> LocalBoxFuture<'_, CaptureOutcome> {
        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().push_back(sender);
        async move { receiver.await.unwrap_or(CaptureOutcome::Aborted) }.boxed_local()
    }
}

/// 三个控制点已就位的记录
pub(crate) fn placed_record(
    start: (f64, f64),
    middle: (f64, f64),
    end: (f64, f64),
) -> AngleMeasurement {
    let mut m = create_record(Point2::new(start.0, start.1));
    m.set_handle_position(HandleKind::Middle, Point2::new(middle.0, middle.1));
    m.set_handle_position(HandleKind::End, Point2::new(end.0, end.1));
    m.active = false;
    m
}
