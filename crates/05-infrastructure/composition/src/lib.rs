//! # 基础设施组合层
//!
//! 负责把组件容器、启动编排器和日志组合成一个可运行的应用。
//!
//! ## 主要功能
//!
//! - **应用构建器**: 使用构建者模式组装容器和初始化器
//! - **服务入口**: `pre_start` / `start` 两阶段启动
//! - **日志配置**: 开发与生产两套预设
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{Application, ContainerServer, LoggingConfig, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let application = Application::builder()
//!         .scan_package("my_app")
//!         .with_logging(LoggingConfig::development())
//!         .build()?;
//!
//!     let server = ContainerServer::from(application);
//!     server.pre_start().await?;
//!     server.start().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod bootstrapper;
pub mod builder;
pub mod server;

#[cfg(test)]
mod tests;

// 重新导出主要类型
pub use application::{Application, ApplicationMetrics, ApplicationStatus};
pub use bootstrapper::ContainerServer;
pub use builder::{ApplicationBuilder, LoggingConfig};
pub use server::Server;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
