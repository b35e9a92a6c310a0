//! 节流调度
//!
//! 连续拖动时每帧都会使缓存失效。节流器保证在一个时间窗口内最多执行一次：
//! 窗口外的调用立即执行，窗口内的调用只保留最后一次，在窗口结束时执行。
//!
//! 调度的参数只包含记录的标识，执行时再从存储中读取记录，
//! 因此总能看到最新的控制点位置。

use crate::host::SurfaceId;
use protractor_core::measurement::MeasurementId;
use protractor_core::spacing::PixelSpacing;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 时间窗口节流器
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_run: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: None,
        }
    }

    /// 提交一次调用
    ///
    /// 返回 `Some` 表示调用方应立即执行；否则参数被挂起，
    /// 覆盖之前挂起的参数。
    pub fn call(&mut self, now: Instant, args: T) -> Option<T> {
        match self.last_run {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                self.pending = Some(args);
                None
            }
            _ => {
                self.pending = None;
                self.last_run = Some(now);
                Some(args)
            }
        }
    }

    /// 挂起调用的执行时间
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_run.map(|last| last + self.interval)
    }

    /// 窗口结束后取出挂起的调用
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.last_run = Some(now);
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 窗口已过且没有挂起调用
    fn is_idle(&self, now: Instant) -> bool {
        self.pending.is_none()
            && self
                .last_run
                .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }
}

/// 一次角度重算
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecomputeRequest {
    pub surface: SurfaceId,
    pub measurement: MeasurementId,
    pub spacing: PixelSpacing,
}

/// 按记录分别节流的重算调度器
#[derive(Debug)]
pub struct RecomputeScheduler {
    interval: Duration,
    throttles: HashMap<(SurfaceId, MeasurementId), Throttle<RecomputeRequest>>,
}

impl RecomputeScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            throttles: HashMap::new(),
        }
    }

    /// 提交重算，返回需要立即执行的请求
    pub fn schedule(&mut self, now: Instant, request: RecomputeRequest) -> Option<RecomputeRequest> {
        let interval = self.interval;
        self.throttles
            .entry((request.surface, request.measurement))
            .or_insert_with(|| Throttle::new(interval))
            .call(now, request)
    }

    /// 取出所有到期的挂起请求，并清理空闲的节流器
    pub fn take_due(&mut self, now: Instant) -> Vec<RecomputeRequest> {
        let due: Vec<_> = self
            .throttles
            .values_mut()
            .filter_map(|throttle| throttle.poll(now))
            .collect();
        self.throttles.retain(|_, throttle| !throttle.is_idle(now));
        due
    }

    /// 最早的挂起请求执行时间，供宿主设置定时器
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttles.values().filter_map(Throttle::deadline).min()
    }

    pub fn has_pending(&self) -> bool {
        self.throttles.values().any(Throttle::is_pending)
    }

    /// 丢弃某条记录的节流状态
    pub fn forget(&mut self, surface: SurfaceId, measurement: MeasurementId) {
        self.throttles.remove(&(surface, measurement));
    }
}
