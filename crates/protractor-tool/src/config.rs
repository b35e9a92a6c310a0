//! 角度工具配置
//!
//! 定义工具的外观和交互参数。所有字段都有默认值，
//! 宿主可以只覆盖需要的部分。

use crate::capture::HandleCaptureOptions;
use protractor_core::measurement::{AngleMeasurement, DEFAULT_DECIMAL_PLACES};
use protractor_core::properties::{Color, LineStyle, ShadowStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 角度工具配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleToolConfig {
    // ===== 控制点 =====
    /// 绘制控制点
    pub draw_handles: bool,
    /// 只绘制激活的控制点
    pub draw_handles_on_hover: bool,
    /// 隐藏移动中的控制点
    pub hide_handles_if_moving: bool,
    /// 控制点半径（None = 宿主默认）
    pub handle_radius: Option<f64>,

    // ===== 线条 =====
    /// 使用虚线绘制两条射线
    pub render_dashed: bool,
    /// 虚线模式
    pub line_dash: Vec<f64>,
    /// 线宽
    pub line_width: f64,
    /// 阴影（None = 不绘制）
    pub shadow: Option<ShadowStyle>,

    // ===== 颜色 =====
    /// 普通颜色
    pub tool_color: Color,
    /// 创建中的颜色
    pub active_color: Color,

    // ===== 弧线与标签 =====
    /// 角度弧线半径（显示像素）
    pub arc_radius: f64,
    /// 标签与顶点的距离
    pub label_distance: f64,
    /// 标签内边距
    pub label_padding: f64,
    /// 标签放在左侧时的额外间距
    pub label_margin: f64,
    /// 角度保留的小数位
    pub decimal_places: u32,

    // ===== 交互 =====
    /// 命中距离（显示像素）
    pub near_distance: f64,
    /// 拖动时重算角度的最小间隔（毫秒）
    pub recompute_interval_ms: u64,
    /// 传给手势服务的放置选项
    pub capture: HandleCaptureOptions,
}

impl Default for AngleToolConfig {
    fn default() -> Self {
        Self {
            draw_handles: true,
            draw_handles_on_hover: false,
            hide_handles_if_moving: false,
            handle_radius: None,

            render_dashed: false,
            line_dash: vec![4.0, 4.0],
            line_width: 1.0,
            shadow: None,

            tool_color: Color::WHITE,
            active_color: Color::GREEN_YELLOW,

            arc_radius: 20.0,
            label_distance: 15.0,
            label_padding: 5.0,
            label_margin: 10.0,
            decimal_places: DEFAULT_DECIMAL_PLACES,

            near_distance: 25.0,
            recompute_interval_ms: 110,
            capture: HandleCaptureOptions::default(),
        }
    }
}

impl AngleToolConfig {
    /// 重算间隔
    pub fn recompute_interval(&self) -> Duration {
        Duration::from_millis(self.recompute_interval_ms)
    }

    /// 记录的显示颜色：指定颜色优先，其次按是否创建中选择
    pub fn color_for(&self, measurement: &AngleMeasurement) -> Color {
        match measurement.color {
            Some(color) => color,
            None if measurement.active => self.active_color,
            None => self.tool_color,
        }
    }

    /// 射线的线条样式
    pub fn line_style(&self, color: Color) -> LineStyle {
        let style = LineStyle::solid(color, self.line_width);
        if self.render_dashed {
            style.with_dash(self.line_dash.clone())
        } else {
            style
        }
    }
}
