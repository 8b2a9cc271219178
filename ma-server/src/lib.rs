//! MA Server - 维修工单跟踪后台
//!
//! # 架构概述
//!
//! 本模块是维修工单后台的主入口，提供以下核心功能：
//!
//! - **工单聚合** (`api/workorders`): 嵌套条目的创建、整体替换与级联删除
//! - **审批派发** (`services/approval`): 每个条目一次外部审批请求，带回调地址
//! - **群聊通知** (`services/notify`): 工单创建播报与已批准维修项提醒
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//!
//! # 模块结构
//!
//! ```text
//! ma-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # LINE 推送、审批派发、消息拼装
//! ├── utils/         # 错误、日志、日期、验证工具
//! └── db/            # 数据库层 (models + repository)
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), log_dir.as_deref());

    Ok(())
}
