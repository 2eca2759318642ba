//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ErrorBody`] - 错误响应结构 (from shared::error)
//! - 日志、时间、输入校验

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
