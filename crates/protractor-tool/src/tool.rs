//! 角度工具
//!
//! 工具实例本身只持有配置和少量运行时状态：
//! 放置过程的重入保护，以及按记录节流的重算调度器。
//! 标注记录全部由宿主的存储持有。

use crate::config::AngleToolConfig;
use crate::host::InteractionType;
use crate::placement::PlacementState;
use crate::throttle::RecomputeScheduler;
use std::cell::{Cell, RefCell};
use std::time::Instant;

/// 工具名称，也是存储中的分组键
pub const ANGLE_TOOL_NAME: &str = "Angle";

/// 角度测量工具
#[derive(Debug)]
pub struct AngleTool {
    name: String,
    config: AngleToolConfig,
    supported_interactions: Vec<InteractionType>,
    /// 进行中的放置（None = 空闲）
    pub(crate) placement: Cell<Option<PlacementState>>,
    pub(crate) scheduler: RefCell<RecomputeScheduler>,
}

impl AngleTool {
    pub fn new() -> Self {
        Self::with_config(AngleToolConfig::default())
    }

    pub fn with_config(config: AngleToolConfig) -> Self {
        let scheduler = RecomputeScheduler::new(config.recompute_interval());
        Self {
            name: ANGLE_TOOL_NAME.to_string(),
            config,
            supported_interactions: vec![InteractionType::Mouse, InteractionType::Touch],
            placement: Cell::new(None),
            scheduler: RefCell::new(scheduler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &AngleToolConfig {
        &self.config
    }

    pub fn supports(&self, interaction: InteractionType) -> bool {
        self.supported_interactions.contains(&interaction)
    }

    /// 是否有放置正在进行
    pub fn is_placing(&self) -> bool {
        self.placement.get().is_some()
    }

    /// 当前放置阶段
    pub fn placement_state(&self) -> Option<PlacementState> {
        self.placement.get()
    }

    /// 下一次挂起重算的执行时间
    pub fn next_recompute_deadline(&self) -> Option<Instant> {
        self.scheduler.borrow().next_deadline()
    }
}

impl Default for AngleTool {
    fn default() -> Self {
        Self::new()
    }
}
