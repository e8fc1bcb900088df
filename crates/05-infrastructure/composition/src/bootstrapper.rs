//! 基于容器的服务入口

use crate::application::{Application, ApplicationStatus};
use crate::server::Server;
use async_trait::async_trait;
use di_abstractions::BeanContext;
use infrastructure_common::{InfrastructureError, InfrastructureResult};
use std::sync::Arc;
use tracing::{info, warn};

/// 容器服务入口
///
/// `pre_start` 初始化日志并执行启动编排，`start` 确认容器已就绪。
pub struct ContainerServer {
    application: Arc<Application>,
}

impl ContainerServer {
    /// 创建服务入口
    pub fn new(application: Arc<Application>) -> Self {
        Self { application }
    }

    /// 应用
    pub fn application(&self) -> &Arc<Application> {
        &self.application
    }
}

#[async_trait]
impl Server for ContainerServer {
    async fn pre_start(&self) -> InfrastructureResult<()> {
        if let Some(logging) = self.application.logging_config() {
            if let Err(e) = logging.try_init() {
                // 全局订阅者已存在时沿用现有订阅者
                warn!("日志初始化跳过: {}", e);
            }
        }

        let report = self.application.start().await?;
        info!(
            "启动编排完成: 执行 {} 个初始化器，{} 个失败",
            report.executed.len(),
            report.failures.len()
        );
        Ok(())
    }

    async fn start(&self) -> InfrastructureResult<()> {
        let container = self.application.container();
        if !container.is_ready() || self.application.get_status().await != ApplicationStatus::Running {
            return Err(InfrastructureError::BootstrapFailed {
                message: "容器尚未就绪，请先调用 pre_start".to_string(),
            });
        }

        info!("服务已就绪，共 {} 个组件", container.bean_names().len());
        Ok(())
    }
}

impl From<Application> for ContainerServer {
    fn from(application: Application) -> Self {
        Self::new(Arc::new(application))
    }
}
