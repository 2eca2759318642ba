//! Court Server - 场地预约管理后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx)，函数式 repository
//! - **预约流程** (`reservations`): 营业时间校验、重叠检查、结算
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! 网格与计价是纯函数，位于 `shared::scheduler` / `shared::pricing`。
//!
//! # 模块结构
//!
//! ```text
//! court-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── db/            # 数据库层 (连接池、迁移、repository)
//! ├── reservations/  # 预约业务规则与结算
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由汇总 + 中间件
//! └── utils/         # 日志、时间、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod reservations;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use routes::build_app;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorBody, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Number of days rolled log files are kept
const LOG_RETENTION_DAYS: u64 = 14;

/// 设置运行环境
///
/// 1. 加载 `.env`
/// 2. 创建工作目录
/// 3. 初始化日志 (控制台 + 按天滚动的日志文件)
pub fn setup_environment() -> core::Result<Config> {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = config.log_dir().to_string_lossy().into_owned();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        // 开发环境只输出到控制台
        (!config.is_development()).then_some(log_dir.as_str()),
    );

    match cleanup_old_logs(&log_dir, LOG_RETENTION_DAYS) {
        Ok(0) => {}
        Ok(n) => tracing::info!(removed = n, "Old log files removed"),
        Err(e) => tracing::warn!(error = %e, "Failed to clean up old logs"),
    }

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ______                  __
  / ____/___  __  _______/ /_
 / /   / __ \/ / / / ___/ __/
/ /___/ /_/ / /_/ / /  / /_
\____/\____/\__,_/_/   \__/
    "#
    );
}
