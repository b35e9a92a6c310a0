//! Protractor 演示程序
//! 在无界面的宿主中完成一次角度测量：放置、拖动、翻转方向，并输出绘制命令

use anyhow::{bail, Context, Result};
use futures::executor::block_on;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use protractor_core::handle::HandleKind;
use protractor_core::math::Point2;
use protractor_core::spacing::PixelSpacing;
use protractor_render::{Camera2D, DisplayList, DrawCommand, TransformService};
use protractor_tool::{
    AngleTool, AngleToolConfig, AnnotationStore, CaptureOutcome, CaptureRequest, FrameContext,
    HandleCapture, InteractionType, MemoryStore, PlacementOutcome, PointerEvent, SurfaceId,
    ToolEvent, ToolHost,
};

const SURFACE: SurfaceId = SurfaceId(1);

/// 帧间隔
const FRAME: Duration = Duration::from_millis(16);

/// 只记录日志的宿主
struct LoggingHost;

impl ToolHost for LoggingHost {
    fn request_redraw(&self, surface: SurfaceId) {
        debug!(%surface, "redraw requested");
    }

    fn emit(&self, surface: SurfaceId, event: ToolEvent) {
        match &event {
            ToolEvent::MeasurementCompleted(done) => info!(
                %surface,
                event = event.name(),
                tool = %done.tool_name,
                measurement = %done.measurement.id,
                "measurement completed"
            ),
        }
    }
}

/// 按预先录制的落点完成放置，`None` 表示用户放弃
struct ReplayCapture<'a> {
    store: &'a RefCell<MemoryStore>,
    points: RefCell<VecDeque<Option<Point2>>>,
}

impl<'a> ReplayCapture<'a> {
    fn new(store: &'a RefCell<MemoryStore>, points: impl IntoIterator<Item = Option<Point2>>) -> Self {
        Self {
            store,
            points: RefCell::new(points.into_iter().collect()),
        }
    }
}

impl HandleCapture for ReplayCapture<'_> {
    fn capture_handle(&self, request: CaptureRequest) -> LocalBoxFuture<'_, CaptureOutcome> {
        let next = self.points.borrow_mut().pop_front().flatten();
        let outcome = match next {
            Some(point) => {
                if let Some(m) = self.store.borrow_mut().measurement_mut(
                    request.event.surface,
                    &request.tool_name,
                    request.measurement,
                ) {
                    m.set_handle_position(request.handle, point);
                }
                debug!(handle = request.handle.name(), x = point.x, y = point.y, "handle placed");
                CaptureOutcome::Placed
            }
            None => CaptureOutcome::Aborted,
        };
        future::ready(outcome).boxed_local()
    }
}

/// 演示宿主
struct ProtractorApp {
    tool: AngleTool,
    store: RefCell<MemoryStore>,
    camera: Camera2D,
    host: LoggingHost,
    spacing: PixelSpacing,
    clock: Instant,
}

impl ProtractorApp {
    fn new() -> Self {
        let config = AngleToolConfig {
            render_dashed: true,
            ..AngleToolConfig::default()
        };

        let mut camera = Camera2D::new(800, 600);
        camera.zoom_at(Point2::new(400.0, 300.0), 1.5);

        Self {
            tool: AngleTool::with_config(config),
            store: RefCell::new(MemoryStore::new()),
            camera,
            host: LoggingHost,
            spacing: PixelSpacing::new(0.5, 0.5),
            clock: Instant::now(),
        }
    }

    fn pointer(&self, image_point: Point2) -> PointerEvent {
        PointerEvent {
            surface: SURFACE,
            image_point,
            display_point: self.camera.image_to_display(&image_point),
        }
    }

    fn place(&self, start: Point2, rest: [Option<Point2>; 2]) -> PlacementOutcome {
        let capture = ReplayCapture::new(&self.store, rest);
        block_on(self.tool.begin_placement(
            &self.store,
            &capture,
            &self.host,
            self.pointer(start),
            InteractionType::Mouse,
        ))
    }

    /// 推进时钟并绘制一帧
    fn frame(&mut self) -> DisplayList {
        self.clock += FRAME;
        self.tool.poll_recompute(&self.store, &self.host, self.clock);

        let mut list = DisplayList::new();
        let frame = FrameContext::new(SURFACE, &self.camera, self.spacing).at(self.clock);
        self.tool.render(&self.store, &frame, &mut list);
        list
    }

    fn current_angle(&self) -> Option<f64> {
        let store = self.store.borrow();
        store.get(SURFACE, self.tool.name())?.data.first()?.angle
    }

    fn drag_end(&self, to: Point2) {
        let mut store = self.store.borrow_mut();
        if let Some(m) = store
            .get_mut(SURFACE, self.tool.name())
            .and_then(|state| state.data.first_mut())
        {
            m.set_handle_position(HandleKind::End, to);
        }
    }
}

fn log_display_list(list: &DisplayList) {
    for command in list.commands() {
        match command {
            DrawCommand::JoinedLines { points, style } => {
                info!(points = points.len(), dashed = style.is_dashed(), "lines")
            }
            DrawCommand::Arc { arc, .. } => info!(sweep = arc.sweep_degrees(), "arc"),
            DrawCommand::Handles { points, .. } => info!(count = points.len(), "handles"),
            DrawCommand::TextBox(text_box) => info!(
                text = %text_box.text,
                color = %text_box.color.to_css(),
                x = text_box.position.x,
                y = text_box.position.y,
                "label"
            ),
            DrawCommand::Save | DrawCommand::Restore | DrawCommand::Shadow(_) => {}
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    info!("Starting Protractor demo...");

    let mut app = ProtractorApp::new();
    info!(
        config = %serde_json::to_string(app.tool.config()).context("serializing tool config")?,
        "tool configured"
    );

    // 放置一个直角
    let outcome = app.place(
        Point2::new(400.0, 200.0),
        [Some(Point2::new(400.0, 300.0)), Some(Point2::new(500.0, 300.0))],
    );
    let PlacementOutcome::Completed(id) = outcome else {
        bail!("placement did not complete: {outcome:?}");
    };
    info!(measurement = %id, "placed");

    let list = app.frame();
    log_display_list(&list);
    info!(angle = ?app.current_angle(), "first frame");

    // 连续拖动终点，节流后只在窗口结束时重算
    for step in 1..=12 {
        app.drag_end(Point2::new(500.0, 300.0 - step as f64 * 8.0));
        app.frame();
        debug!(step, angle = ?app.current_angle(), "dragging");
    }
    for _ in 0..8 {
        app.frame();
    }
    info!(angle = ?app.current_angle(), "after drag");

    // 双击射线翻转方向
    let ray_point = app.camera.image_to_display(&Point2::new(400.0, 250.0));
    let event = PointerEvent {
        surface: SURFACE,
        image_point: Point2::new(400.0, 250.0),
        display_point: ray_point,
    };
    if !app.tool.double_click(&app.store, &app.camera, &app.host, &event) {
        bail!("double click missed the measurement");
    }
    app.clock += Duration::from_millis(200);
    let list = app.frame();
    log_display_list(&list);
    info!(angle = ?app.current_angle(), "after toggle");

    // 放弃的放置不会留下记录
    let outcome = app.place(Point2::new(100.0, 100.0), [Some(Point2::new(150.0, 100.0)), None]);
    info!(?outcome, measurements = app.store.borrow().len(), "abandoned placement");

    Ok(())
}
