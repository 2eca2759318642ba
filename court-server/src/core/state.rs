use sqlx::SqlitePool;

use shared::scheduler::OperatingHours;

use crate::core::{Config, Result};
use crate::db::DbService;

/// 服务器状态
///
/// 配置 + 数据库连接池。`SqlitePool` 内部是 Arc，clone 成本极低，
/// 每个 handler 通过 axum `State` 拿到一份。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 校验配置
    /// 2. 工作目录结构
    /// 3. 数据库 (迁移)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.validate()?;
        config.ensure_work_dir_structure()?;

        let db_path = config.database_file();
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db.pool))
    }

    /// 内存数据库状态 (测试)
    pub async fn in_memory(config: Config) -> Result<Self> {
        config.validate()?;
        let db = DbService::in_memory().await?;
        Ok(Self::new(config, db.pool))
    }

    /// 营业时间
    pub fn hours(&self) -> &OperatingHours {
        &self.config.hours
    }
}
