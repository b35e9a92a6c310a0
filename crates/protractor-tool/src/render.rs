//! 绘制流程
//!
//! 每帧对当前表面上的每条可见记录依次执行：
//!
//! 1. 跳过不可见的记录
//! 2. 将三个控制点变换到显示坐标，绘制两条相连的射线
//! 3. 以显示坐标的叉积确定尚未确定的方向
//! 4. 绘制角度弧线，扫向与方向一致
//! 5. 按显示规则绘制控制点
//! 6. 缓存失效时重算角度：首次立即计算，之后节流
//! 7. 有角度时绘制标签，未手动移动过的标签自动定位
//!
//! 方向必须在绘制弧线和调度重算之前确定，重算只在方向未定时才自行判定。

use crate::host::{SurfaceId, ToolHost};
use crate::store::AnnotationStore;
use crate::throttle::RecomputeRequest;
use crate::tool::AngleTool;
use protractor_core::error::AngleError;
use protractor_core::geometry::{cross_product, resolve_display_orientation, AngleArc};
use protractor_core::handle::{HandleKind, HandleState};
use protractor_core::math::Point2;
use protractor_core::measurement::AngleMeasurement;
use protractor_core::properties::LineStyle;
use protractor_core::spacing::PixelSpacing;
use protractor_render::{draw_scoped, HandleStyle, LinkedTextBox, RenderSurface, TransformService};
use std::cell::RefCell;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// 一帧的绘制上下文
pub struct FrameContext<'a> {
    pub surface: SurfaceId,
    pub transform: &'a dyn TransformService,
    /// 当前图像的像素间距
    pub spacing: PixelSpacing,
    pub now: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(surface: SurfaceId, transform: &'a dyn TransformService, spacing: PixelSpacing) -> Self {
        Self {
            surface,
            transform,
            spacing,
            now: Instant::now(),
        }
    }

    pub fn at(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }
}

impl AngleTool {
    /// 绘制当前表面上的全部角度标注
    ///
    /// 表面上没有标注集合时什么也不做。
    pub fn render<S, R>(&self, store: &RefCell<S>, frame: &FrameContext<'_>, target: &mut R)
    where
        S: AnnotationStore,
        R: RenderSurface + ?Sized,
    {
        let mut store = store.borrow_mut();
        let Some(state) = store.get_mut(frame.surface, self.name()) else {
            return;
        };

        for measurement in state.data.iter_mut().filter(|m| m.visible) {
            draw_scoped(&mut *target, |target| self.render_measurement(measurement, frame, target));
        }
    }

    fn render_measurement<R>(&self, m: &mut AngleMeasurement, frame: &FrameContext<'_>, target: &mut R)
    where
        R: RenderSurface + ?Sized,
    {
        let config = self.config();
        let color = config.color_for(m);

        if let Some(shadow) = &config.shadow {
            target.set_shadow(shadow);
        }

        let [start, middle, end] = m
            .handles
            .positions()
            .map(|p| frame.transform.image_to_display(&p));
        target.draw_joined_lines(&[start, middle, end], &config.line_style(color));

        let start_ray = start - middle;
        let end_ray = end - middle;
        let cross = cross_product(&start_ray, &end_ray);
        let cached_angle = m.angle;
        let clockwise = *m
            .clockwise
            .get_or_insert_with(|| resolve_display_orientation(cross, cached_angle, None));

        let arc = AngleArc::between_rays(middle, &start_ray, &end_ray, config.arc_radius, clockwise);
        target.draw_arc(&arc, &LineStyle::solid(color, config.line_width));

        if config.draw_handles {
            let visible: Vec<Point2> = HandleKind::ALL
                .iter()
                .zip([start, middle, end])
                .filter(|(kind, _)| self.should_draw_handle(m.handles.get(**kind)))
                .map(|(_, point)| point)
                .collect();
            if !visible.is_empty() {
                let style = HandleStyle {
                    color,
                    radius: config.handle_radius,
                    line_width: config.line_width,
                };
                target.draw_handles(&visible, &style);
            }
        }

        if m.invalidated {
            self.request_recompute(m, frame);
        }

        let Some(text) = m.label_text(&frame.spacing) else {
            return;
        };

        let position = if m.handles.label.has_moved {
            m.handles.label.position.map(|p| frame.transform.image_to_display(&p))
        } else {
            let display = self.auto_label_position(&text, start, middle, &*target);
            match frame.transform.display_to_image(&display) {
                Ok(image) => m.handles.label.position = Some(image),
                Err(err) => warn!(measurement = %m.id, %err, "label position not stored"),
            }
            Some(display)
        };

        if let Some(position) = position {
            target.draw_linked_text_box(&LinkedTextBox {
                position,
                text,
                anchors: vec![start, middle, end],
                color,
                line_width: config.line_width,
                x_offset: 0.0,
                y_centered: true,
            });
        }
    }

    fn should_draw_handle(&self, handle: &HandleState) -> bool {
        let config = self.config();
        if config.draw_handles_on_hover && !handle.flags.active {
            return false;
        }
        !(config.hide_handles_if_moving && handle.flags.moving)
    }

    /// 顶点在起点左侧时标签放左边，否则放右边
    fn auto_label_position<R>(&self, text: &str, start: Point2, middle: Point2, target: &R) -> Point2
    where
        R: RenderSurface + ?Sized,
    {
        let config = self.config();
        let offset = if middle.x < start.x {
            let width = target.text_box_width(text, config.label_padding);
            -(config.label_distance + width + config.label_margin)
        } else {
            config.label_distance
        };
        Point2::new(middle.x + offset, middle.y)
    }

    fn request_recompute(&self, m: &mut AngleMeasurement, frame: &FrameContext<'_>) {
        // 首次计算不节流，保证第一帧就有标签
        if m.angle.is_none() {
            self.recompute(m, &frame.spacing);
            return;
        }

        let request = RecomputeRequest {
            surface: frame.surface,
            measurement: m.id,
            spacing: frame.spacing,
        };
        let run_now = self.scheduler.borrow_mut().schedule(frame.now, request);
        if run_now.is_some() {
            self.recompute(m, &frame.spacing);
        } else {
            trace!(measurement = %m.id, "recompute deferred");
        }
    }

    fn recompute(&self, m: &mut AngleMeasurement, spacing: &PixelSpacing) {
        match m.update_cached_stats(spacing, self.config().decimal_places) {
            Ok(angle) => trace!(measurement = %m.id, angle, "angle recomputed"),
            Err(err) => debug!(measurement = %m.id, %err, "angle recompute skipped"),
        }
    }

    fn run_deferred<S>(&self, store: &mut S, request: &RecomputeRequest) -> Result<(), AngleError>
    where
        S: AnnotationStore + ?Sized,
    {
        let m = store
            .measurement_mut(request.surface, self.name(), request.measurement)
            .ok_or(AngleError::MeasurementNotFound(request.measurement))?;
        if m.invalidated {
            self.recompute(m, &request.spacing);
        }
        Ok(())
    }

    /// 执行到期的节流重算
    ///
    /// 宿主在定时器或每帧开始时调用。记录在执行时才从存储中读取，
    /// 已被删除的记录直接跳过。返回执行的重算次数。
    pub fn poll_recompute<S, H>(&self, store: &RefCell<S>, host: &H, now: Instant) -> usize
    where
        S: AnnotationStore,
        H: ToolHost + ?Sized,
    {
        let due = self.scheduler.borrow_mut().take_due(now);
        if due.is_empty() {
            return 0;
        }

        let mut surfaces: Vec<SurfaceId> = Vec::new();
        {
            let mut store = store.borrow_mut();
            for request in &due {
                if let Err(err) = self.run_deferred(&mut *store, request) {
                    trace!(%err, "deferred recompute dropped");
                }
                if !surfaces.contains(&request.surface) {
                    surfaces.push(request.surface);
                }
            }
        }

        for surface in surfaces {
            host.request_redraw(surface);
        }
        due.len()
    }
}
