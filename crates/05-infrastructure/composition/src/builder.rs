//! 应用构建器

use crate::application::Application;
use di_abstractions::{ComponentDiscovery, ContainerConfig, ScanScope};
use di_impl::{
    BeanContainer, CatalogDiscovery, LifecycleOrchestrator, OrderedInitializer, CONTAINER_INIT_ORDER,
};
use infrastructure_common::{Initializable, InfrastructureError, InfrastructureResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 应用构建器
///
/// 使用建造者模式组装容器和启动编排器
pub struct ApplicationBuilder {
    /// 组件发现器，未设置时读取全局目录
    discovery: Option<Arc<dyn ComponentDiscovery>>,
    /// 容器配置
    container_config: ContainerConfig,
    /// 额外的初始化器
    initializers: Vec<OrderedInitializer>,
    /// 日志配置，设置后在 `pre_start` 中初始化
    logging_config: Option<LoggingConfig>,
}

impl ApplicationBuilder {
    /// 创建新的应用构建器
    pub fn new() -> Self {
        Self {
            discovery: None,
            container_config: ContainerConfig::default(),
            initializers: Vec::new(),
            logging_config: None,
        }
    }

    /// 使用自定义组件发现器
    pub fn with_discovery<D: ComponentDiscovery + 'static>(mut self, discovery: D) -> Self {
        debug!("使用自定义组件发现器");
        self.discovery = Some(Arc::new(discovery));
        self
    }

    /// 设置扫描范围
    pub fn with_scan_scope(mut self, scope: ScanScope) -> Self {
        info!("设置扫描范围: {:?}", scope);
        self.container_config.scan_scope = scope;
        self
    }

    /// 只扫描指定模块路径之下的组件
    pub fn scan_package<S: Into<String>>(self, prefix: S) -> Self {
        let scope = self.container_config.scan_scope.clone().include(prefix);
        self.with_scan_scope(scope)
    }

    /// 设置等待装配时的日志间隔
    pub fn with_ready_wait_log_interval(mut self, interval: Duration) -> Self {
        self.container_config.ready_wait_log_interval = interval;
        self
    }

    /// 添加预先创建的初始化器
    pub fn add_initializer<T: Initializable>(mut self, initializer: T, order: i32) -> Self {
        debug!("添加初始化器: {} (order = {})", std::any::type_name::<T>(), order);
        self.initializers
            .push(OrderedInitializer::new(Arc::new(initializer), order));
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 构建应用
    pub fn build(self) -> InfrastructureResult<Application> {
        if self.container_config.ready_wait_log_interval.is_zero() {
            return Err(InfrastructureError::BootstrapFailed {
                message: "等待日志间隔必须大于 0".to_string(),
            });
        }

        let discovery = self
            .discovery
            .unwrap_or_else(|| Arc::new(CatalogDiscovery::new()));
        let scope = self.container_config.scan_scope.clone();

        let container = BeanContainer::new(discovery.clone(), self.container_config);
        let orchestrator = self.initializers.into_iter().fold(
            LifecycleOrchestrator::new(discovery, scope).with_initializer(OrderedInitializer::new(
                container.clone(),
                CONTAINER_INIT_ORDER,
            )),
            LifecycleOrchestrator::with_initializer,
        );

        info!("应用构建完成");
        Ok(Application::new(container, orchestrator, self.logging_config))
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 设置日志级别
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// 设置是否使用 JSON 格式
    pub fn with_json(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }

    /// 初始化全局日志订阅者
    pub fn try_init(&self) -> InfrastructureResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::LoggingInitFailed {
            message: e.to_string(),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
