//! 进程入口抽象

use async_trait::async_trait;
use infrastructure_common::InfrastructureResult;

/// 服务入口 trait
///
/// 先调用 `pre_start` 完成准备工作，再调用 `start` 开始对外服务。
#[async_trait]
pub trait Server: Send + Sync {
    /// 启动前的准备工作
    async fn pre_start(&self) -> InfrastructureResult<()>;

    /// 启动服务
    async fn start(&self) -> InfrastructureResult<()>;
}
