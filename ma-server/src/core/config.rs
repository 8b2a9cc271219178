//! 服务器配置 - 所有配置项
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | /var/lib/ma-server | 工作目录 |
//! | HTTP_PORT | 8000 | HTTP 服务端口 |
//! | PUBLIC_BASE_URL | http://localhost:8000 | 审批回调的外部地址 |
//! | LINE_API_BASE | https://api.line.me | LINE Messaging API 地址 |
//! | LINE_ACCESS_TOKEN | (empty) | LINE channel access token |
//! | LINE_GROUP_ID | (empty) | 接收通知的群组 ID |
//! | APPROVAL_API_URL | http://localhost:3001/api/approvals | 外部审批服务地址 |
//! | REQUEST_TIMEOUT_MS | 30000 | 出站请求超时(毫秒) |
//! | ENVIRONMENT | development | 运行环境 |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,

    /// 审批系统回调本服务时使用的外部基础地址
    pub public_base_url: String,

    // === 出站依赖 ===
    /// LINE Messaging API 基础地址
    pub line_api_base: String,
    /// LINE channel access token
    pub line_access_token: String,
    /// 接收通知的群组 ID
    pub line_group_id: String,
    /// 外部审批服务地址
    pub approval_api_url: String,
    /// 出站请求超时 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/ma-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            line_api_base: std::env::var("LINE_API_BASE")
                .unwrap_or_else(|_| "https://api.line.me".into()),
            line_access_token: std::env::var("LINE_ACCESS_TOKEN").unwrap_or_default(),
            line_group_id: std::env::var("LINE_GROUP_ID").unwrap_or_default(),
            approval_api_url: std::env::var("APPROVAL_API_URL")
                .unwrap_or_else(|_| "http://localhost:3001/api/approvals".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
