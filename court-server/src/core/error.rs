use thiserror::Error;

use crate::utils::AppError;

/// 服务器启动 / 运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("初始化失败: {0}")]
    Init(#[from] AppError),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
