//! 角度测量错误定义

use crate::measurement::MeasurementId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AngleError {
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("Transform is not invertible")]
    SingularTransform,

    #[error("Measurement not found: {0}")]
    MeasurementNotFound(MeasurementId),
}
