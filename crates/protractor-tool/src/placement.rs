//! 放置状态机
//!
//! 按下指针时创建记录，随后依次交给手势服务放置顶点和终点：
//!
//! ```text
//! AwaitingMiddle ──成功──▶ AwaitingEnd ──成功──▶ PlacementOutcome::Completed
//!       │                       │
//!       └──────失败─────────────┴──────────────▶ PlacementOutcome::Cancelled
//! ```
//!
//! 终态只通过 [`PlacementOutcome`] 返回，放置结束后 `placement_state()` 为 `None`。
//!
//! 任一步失败都会从存储中删除未完成的记录。同一工具实例同时只能有一个
//! 放置过程，期间新的按下事件被忽略。
//!
//! 放置过程是一个 future。宿主丢弃它时，未完成的记录同样会被删除，
//! 重入保护随之解除。

use crate::capture::{CaptureRequest, HandleCapture};
use crate::host::{InteractionType, MeasurementCompleted, PointerEvent, SurfaceId, ToolEvent, ToolHost};
use crate::store::AnnotationStore;
use crate::tool::AngleTool;
use protractor_core::handle::HandleKind;
use protractor_core::measurement::{create_record, MeasurementId};
use std::cell::RefCell;
use tracing::{debug, warn};

/// 放置阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    /// 等待放置顶点
    AwaitingMiddle,
    /// 等待放置终点
    AwaitingEnd,
}

/// 放置结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// 已有放置在进行，本次按下被忽略
    Ignored,
    Completed(MeasurementId),
    Cancelled,
}

/// 放置期间的清理守卫
///
/// 未标记完成就被释放时删除记录。无论如何都会解除重入保护。
struct PlacementGuard<'a, S: AnnotationStore> {
    tool: &'a AngleTool,
    store: &'a RefCell<S>,
    surface: SurfaceId,
    measurement: MeasurementId,
    finished: bool,
}

impl<S: AnnotationStore> PlacementGuard<'_, S> {
    /// 删除未完成的记录并通知重绘
    fn cancel<H: ToolHost + ?Sized>(&mut self, host: &H) {
        self.remove_record();
        self.finished = true;
        host.request_redraw(self.surface);
    }

    fn remove_record(&self) {
        match self.store.try_borrow_mut() {
            Ok(mut store) => {
                store.remove(self.surface, self.tool.name(), self.measurement);
            }
            Err(_) => {
                warn!(measurement = %self.measurement, "annotation store busy, incomplete measurement left behind");
            }
        }
        if let Ok(mut scheduler) = self.tool.scheduler.try_borrow_mut() {
            scheduler.forget(self.surface, self.measurement);
        }
    }
}

impl<S: AnnotationStore> Drop for PlacementGuard<'_, S> {
    fn drop(&mut self) {
        if !self.finished {
            debug!(measurement = %self.measurement, "placement dropped before completion");
            self.remove_record();
        }
        self.tool.placement.set(None);
    }
}

impl AngleTool {
    /// 开始一次交互式放置
    ///
    /// 在指针位置创建记录并登记到存储，然后等待手势服务依次放置
    /// 顶点和终点。每次状态变化后都请求重绘。
    pub async fn begin_placement<S, C, H>(
        &self,
        store: &RefCell<S>,
        capture: &C,
        host: &H,
        event: PointerEvent,
        interaction: InteractionType,
    ) -> PlacementOutcome
    where
        S: AnnotationStore,
        C: HandleCapture + ?Sized,
        H: ToolHost + ?Sized,
    {
        if self.is_placing() {
            debug!(surface = %event.surface, "placement already in progress, ignoring pointer down");
            return PlacementOutcome::Ignored;
        }

        let surface = event.surface;
        let measurement = create_record(event.image_point);
        let id = measurement.id;
        store.borrow_mut().add(surface, self.name(), measurement);
        self.placement.set(Some(PlacementState::AwaitingMiddle));

        let mut guard = PlacementGuard {
            tool: self,
            store,
            surface,
            measurement: id,
            finished: false,
        };
        host.request_redraw(surface);
        debug!(%surface, measurement = %id, ?interaction, "angle placement started");

        let outcome = capture
            .capture_handle(self.capture_request(event, id, HandleKind::Middle, interaction))
            .await;
        if !outcome.is_placed() {
            debug!(measurement = %id, "middle handle placement aborted");
            guard.cancel(host);
            return PlacementOutcome::Cancelled;
        }

        let found = store
            .borrow_mut()
            .measurement_mut(surface, self.name(), id)
            .map(|m| {
                m.handles.middle.flags.active = false;
                m.handles.end.flags.active = true;
            })
            .is_some();
        if !found {
            warn!(measurement = %id, "measurement removed during placement");
            guard.cancel(host);
            return PlacementOutcome::Cancelled;
        }
        self.placement.set(Some(PlacementState::AwaitingEnd));
        host.request_redraw(surface);

        let outcome = capture
            .capture_handle(self.capture_request(event, id, HandleKind::End, interaction))
            .await;
        if !outcome.is_placed() {
            debug!(measurement = %id, "end handle placement aborted");
            guard.cancel(host);
            return PlacementOutcome::Cancelled;
        }

        let snapshot = store
            .borrow_mut()
            .measurement_mut(surface, self.name(), id)
            .map(|m| {
                m.active = false;
                m.handles.end.flags.active = false;
                m.clone()
            });
        let Some(snapshot) = snapshot else {
            warn!(measurement = %id, "measurement removed during placement");
            guard.cancel(host);
            return PlacementOutcome::Cancelled;
        };

        guard.finished = true;
        host.request_redraw(surface);
        host.emit(
            surface,
            ToolEvent::MeasurementCompleted(MeasurementCompleted {
                tool_name: self.name().to_string(),
                surface,
                measurement: snapshot,
            }),
        );
        debug!(%surface, measurement = %id, "angle placement completed");

        PlacementOutcome::Completed(id)
    }

    fn capture_request(
        &self,
        event: PointerEvent,
        measurement: MeasurementId,
        handle: HandleKind,
        interaction: InteractionType,
    ) -> CaptureRequest {
        CaptureRequest {
            event,
            tool_name: self.name().to_string(),
            measurement,
            handle,
            options: self.config().capture,
            interaction,
        }
    }
}
