//! 标注存储
//!
//! 标注集合由宿主持有，按绘图表面和工具名称分组。工具每次操作都重新获取，
//! 不跨帧缓存引用。

use crate::host::SurfaceId;
use protractor_core::measurement::{AngleMeasurement, MeasurementId};
use std::collections::HashMap;

/// 某个表面上某个工具的全部记录
#[derive(Debug, Clone, Default)]
pub struct ToolState {
    pub data: Vec<AngleMeasurement>,
}

impl ToolState {
    pub fn find(&self, id: MeasurementId) -> Option<&AngleMeasurement> {
        self.data.iter().find(|m| m.id == id)
    }

    pub fn find_mut(&mut self, id: MeasurementId) -> Option<&mut AngleMeasurement> {
        self.data.iter_mut().find(|m| m.id == id)
    }
}

/// 标注存储接口
pub trait AnnotationStore {
    fn add(&mut self, surface: SurfaceId, tool_name: &str, measurement: AngleMeasurement);

    fn get(&self, surface: SurfaceId, tool_name: &str) -> Option<&ToolState>;

    fn get_mut(&mut self, surface: SurfaceId, tool_name: &str) -> Option<&mut ToolState>;

    fn remove(
        &mut self,
        surface: SurfaceId,
        tool_name: &str,
        id: MeasurementId,
    ) -> Option<AngleMeasurement>;

    /// 按ID查找记录
    fn measurement(
        &self,
        surface: SurfaceId,
        tool_name: &str,
        id: MeasurementId,
    ) -> Option<&AngleMeasurement> {
        self.get(surface, tool_name)?.find(id)
    }

    /// 按ID查找记录（可变）
    fn measurement_mut(
        &mut self,
        surface: SurfaceId,
        tool_name: &str,
        id: MeasurementId,
    ) -> Option<&mut AngleMeasurement> {
        self.get_mut(surface, tool_name)?.find_mut(id)
    }
}

/// 内存中的标注存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: HashMap<(SurfaceId, String), ToolState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有表面上的记录总数
    pub fn len(&self) -> usize {
        self.states.values().map(|s| s.data.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnnotationStore for MemoryStore {
    fn add(&mut self, surface: SurfaceId, tool_name: &str, measurement: AngleMeasurement) {
        self.states
            .entry((surface, tool_name.to_string()))
            .or_default()
            .data
            .push(measurement);
    }

    fn get(&self, surface: SurfaceId, tool_name: &str) -> Option<&ToolState> {
        self.states.get(&(surface, tool_name.to_string()))
    }

    fn get_mut(&mut self, surface: SurfaceId, tool_name: &str) -> Option<&mut ToolState> {
        self.states.get_mut(&(surface, tool_name.to_string()))
    }

    fn remove(
        &mut self,
        surface: SurfaceId,
        tool_name: &str,
        id: MeasurementId,
    ) -> Option<AngleMeasurement> {
        let state = self.get_mut(surface, tool_name)?;
        let index = state.data.iter().position(|m| m.id == id)?;
        Some(state.data.remove(index))
    }
}
