//! 应用主入口

use crate::builder::{ApplicationBuilder, LoggingConfig};
use chrono::{DateTime, Utc};
use di_abstractions::{BeanContext, LifecycleReport, PopulationReport};
use di_impl::{BeanContainer, LifecycleOrchestrator};
use infrastructure_common::{InfrastructureError, InfrastructureResult};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// 应用
///
/// 持有组件容器和启动编排器。启动编排只执行一次，容器作为顺序为 1 的
/// 初始化器在编排中完成装配。
pub struct Application {
    /// 组件容器
    container: Arc<BeanContainer>,
    /// 启动编排器
    orchestrator: Arc<LifecycleOrchestrator>,
    /// 日志配置
    logging_config: Option<LoggingConfig>,
    /// 运行状态
    status: RwLock<ApplicationStatus>,
    /// 统计信息
    metrics: RwLock<ApplicationMetrics>,
}

impl Application {
    /// 创建应用构建器
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub(crate) fn new(
        container: Arc<BeanContainer>,
        orchestrator: LifecycleOrchestrator,
        logging_config: Option<LoggingConfig>,
    ) -> Self {
        Self {
            container,
            orchestrator: Arc::new(orchestrator),
            logging_config,
            status: RwLock::new(ApplicationStatus::Initialized),
            metrics: RwLock::new(ApplicationMetrics::default()),
        }
    }

    /// 执行启动编排
    ///
    /// 编排在阻塞线程池中执行。重复调用返回第一次执行的报告。
    pub async fn start(&self) -> InfrastructureResult<LifecycleReport> {
        if let Some(report) = self.orchestrator.report() {
            debug!("应用已启动，返回首次启动报告");
            return Ok(report.clone());
        }

        info!("启动应用");
        *self.status.write().await = ApplicationStatus::Starting;
        self.metrics.write().await.start_time = Some(Utc::now());

        let orchestrator = self.orchestrator.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            orchestrator
                .run()
                .cloned()
                .or_else(|| orchestrator.report().cloned())
        })
        .await;

        let report = match outcome {
            Ok(Some(report)) => report,
            Ok(None) => {
                warn!("启动编排正在其他调用中执行");
                return Err(InfrastructureError::BootstrapFailed {
                    message: "启动编排正在进行中".to_string(),
                });
            }
            Err(e) => {
                error!("启动编排任务异常终止: {}", e);
                *self.status.write().await = ApplicationStatus::Failed;
                return Err(InfrastructureError::BootstrapFailed {
                    message: format!("启动编排任务异常终止: {}", e),
                });
            }
        };

        let population = self.container.populate()?;
        {
            let mut metrics = self.metrics.write().await;
            metrics.ready_time = Some(Utc::now());
            metrics.registered_beans = population.registered_count();
            metrics.population_issues = population.issues.len();
            metrics.initializers_executed = report.executed.len();
            metrics.initializer_failures = report.failures.len();
        }

        for failure in &report.failures {
            warn!("初始化器失败: {}", failure.to_error());
        }

        *self.status.write().await = ApplicationStatus::Running;
        info!("应用启动完成");
        Ok(report)
    }

    /// 组件容器
    pub fn container(&self) -> &Arc<BeanContainer> {
        &self.container
    }

    /// 以组件上下文的形式获取容器
    pub fn context(&self) -> Arc<dyn BeanContext> {
        self.container.clone()
    }

    /// 日志配置
    pub fn logging_config(&self) -> Option<&LoggingConfig> {
        self.logging_config.as_ref()
    }

    /// 装配报告
    pub fn population_report(&self) -> Option<&PopulationReport> {
        self.container.population_report()
    }

    /// 启动编排报告
    pub fn lifecycle_report(&self) -> Option<&LifecycleReport> {
        self.orchestrator.report()
    }

    /// 获取运行状态
    pub async fn get_status(&self) -> ApplicationStatus {
        *self.status.read().await
    }

    /// 获取统计信息
    pub async fn get_metrics(&self) -> ApplicationMetrics {
        self.metrics.read().await.clone()
    }
}

/// 应用运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplicationStatus {
    /// 已初始化
    Initialized,
    /// 启动中
    Starting,
    /// 运行中
    Running,
    /// 失败
    Failed,
}

/// 应用统计信息
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplicationMetrics {
    /// 启动时间
    pub start_time: Option<DateTime<Utc>>,
    /// 就绪时间
    pub ready_time: Option<DateTime<Utc>>,
    /// 已注册的组件数量
    pub registered_beans: usize,
    /// 装配问题数量
    pub population_issues: usize,
    /// 已执行的初始化器数量
    pub initializers_executed: usize,
    /// 失败的初始化器数量
    pub initializer_failures: usize,
}

impl ApplicationMetrics {
    /// 启动耗时
    pub fn startup_duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.ready_time) {
            (Some(start), Some(ready)) => Some(ready - start),
            _ => None,
        }
    }
}
