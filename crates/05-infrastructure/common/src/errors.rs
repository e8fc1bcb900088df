//! 错误类型定义

use thiserror::Error;

/// 用户工厂函数与初始化器返回的通用错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: BoxError,
    },

    #[error("组件名称重复: {name} (丢弃 {type_name})")]
    DuplicateComponentName { name: String, type_name: String },

    #[error("注入点未解析: {bean}.{member} ({target})")]
    UnresolvedInjectionPoint {
        bean: String,
        member: String,
        target: String,
    },

    #[error("组件容器正在当前线程中加载，无法重入")]
    PopulationInProgress,

    #[error("容器感知回调失败: {type_name}, 原因: {message}")]
    AwareCallbackFailed { type_name: String, message: String },
}

impl DependencyError {
    /// 创建组件创建失败错误
    pub fn creation_failed(type_name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 生命周期管理错误类型
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("初始化器创建失败: {type_name}, 原因: {source}")]
    InitializerCreationFailed {
        type_name: String,
        source: BoxError,
    },

    #[error("初始化器执行失败: {type_name} (order={order}), 原因: {source}")]
    InitializerFailed {
        type_name: String,
        order: i32,
        source: BoxError,
    },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("生命周期错误: {source}")]
    LifecycleError {
        #[from]
        source: LifecycleError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },

    #[error("日志系统初始化失败: {message}")]
    LoggingInitFailed { message: String },
}

/// 把 `catch_unwind` 捕获的 panic 负载转换为可读消息
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_variants() {
        let static_payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(static_payload.as_ref()), "boom");

        let owned_payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(owned_payload.as_ref()), "owned boom");

        let other_payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(other_payload.as_ref()), "unknown panic");
    }

    #[test]
    fn test_dependency_error_display() {
        let err = DependencyError::creation_failed("demo::Service", "构造失败");
        assert_eq!(err.to_string(), "组件创建失败: demo::Service, 原因: 构造失败");

        let wrapped: InfrastructureError = err.into();
        assert!(wrapped.to_string().starts_with("依赖注入错误"));
    }
}
