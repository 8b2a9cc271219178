//! 服务器状态
//!
//! [`ServerState`] 持有所有共享服务的引用：配置、嵌入式数据库、
//! 出站聊天客户端与审批客户端。使用 Arc 实现浅拷贝。

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{ApprovalGateway, ChatNotifier, HttpApprovalClient, LineClient};
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的单例引用
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 群聊通知客户端
    pub chat: Arc<dyn ChatNotifier>,
    /// 外部审批客户端
    pub approval: Arc<dyn ApprovalGateway>,
}

impl ServerState {
    /// 手动构造 (测试注入假客户端时使用)
    pub fn with_services(
        config: Config,
        db: Surreal<Db>,
        chat: Arc<dyn ChatNotifier>,
        approval: Arc<dyn ApprovalGateway>,
    ) -> Self {
        Self {
            config,
            db,
            chat,
            approval,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：工作目录结构、数据库、出站客户端。
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .map_err(|e| crate::utils::AppError::internal(format!("Create work dir: {e}")))?;

        // 1. Initialize DB (work_dir/database/ma.db)
        let db_path = config.database_dir().join("ma.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        // 2. Outbound clients, built once
        let chat: Arc<dyn ChatNotifier> = Arc::new(LineClient::new(config)?);
        let approval: Arc<dyn ApprovalGateway> = Arc::new(HttpApprovalClient::new(config)?);

        Ok(Self::with_services(
            config.clone(),
            db_service.db,
            chat,
            approval,
        ))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
