use court_server::{Server, ServerState, api, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 工作目录, 日志) 并加载配置
    let config = setup_environment()?;

    // 打印横幅
    print_banner();
    api::health::mark_started();

    tracing::info!(
        environment = %config.environment,
        open_hour = config.hours.open_hour,
        close_hour = config.hours.close_hour,
        slot_minutes = config.hours.slot_minutes,
        "🎾 Court Server starting..."
    );

    // 2. 初始化服务器状态 (数据库 + 迁移)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
