//! 像素间距
//!
//! 非各向同性图像的行/列像素间距。任一轴未知（缺失或为零）时，
//! 几何计算退化为比例 1，标签附加各向同性提示。

use serde::{Deserialize, Serialize};

/// 标签中的各向同性提示
pub const ISOTROPIC_SUFFIX: &str = " (isotropic)";

/// 行/列像素间距
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelSpacing {
    /// 行间距（作用于 y）
    pub row: Option<f64>,
    /// 列间距（作用于 x）
    pub column: Option<f64>,
}

impl PixelSpacing {
    pub fn new(row: f64, column: f64) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
        }
    }

    /// 未知间距
    pub fn unknown() -> Self {
        Self::default()
    }

    /// y 方向比例因子
    pub fn row_scale(&self) -> f64 {
        known(self.row).unwrap_or(1.0)
    }

    /// x 方向比例因子
    pub fn column_scale(&self) -> f64 {
        known(self.column).unwrap_or(1.0)
    }

    /// 任一轴未知时为 true
    pub fn is_isotropic_fallback(&self) -> bool {
        known(self.row).is_none() || known(self.column).is_none()
    }

    /// 标签后缀
    pub fn label_suffix(&self) -> &'static str {
        if self.is_isotropic_fallback() {
            ISOTROPIC_SUFFIX
        } else {
            ""
        }
    }
}

fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}
