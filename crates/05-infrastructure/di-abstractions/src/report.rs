//! 装配与启动报告
//!
//! 单个候选的失败不会中断整体流程，但都会记录在报告中。

use infrastructure_common::{DependencyError, LifecycleError};
use serde::Serialize;

/// 已注册的组件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredBean {
    /// 逻辑名称
    pub name: String,
    /// 完全限定类型名
    pub type_name: &'static str,
}

/// 未解析的注入点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedInjection {
    /// 所属组件名称
    pub bean: String,
    /// 成员名称
    pub member: String,
    /// 声明类型
    pub target: String,
    /// 显式指定的组件名称
    pub qualifier: Option<String>,
}

/// 装配问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopulationIssue {
    /// 实例化失败，候选被跳过
    InstantiationFailed { type_name: String, message: String },
    /// 名称重复，后注册的候选被丢弃
    DuplicateName { name: String, type_name: String },
    /// 注入点未解析，字段保持默认值
    UnresolvedInjection(UnresolvedInjection),
    /// 容器感知回调失败
    AwareFailed { type_name: String, message: String },
}

impl PopulationIssue {
    /// 转换为依赖注入错误
    pub fn to_error(&self) -> DependencyError {
        match self {
            Self::InstantiationFailed { type_name, message } => {
                DependencyError::creation_failed(type_name.clone(), message.clone())
            }
            Self::DuplicateName { name, type_name } => DependencyError::DuplicateComponentName {
                name: name.clone(),
                type_name: type_name.clone(),
            },
            Self::UnresolvedInjection(unresolved) => DependencyError::UnresolvedInjectionPoint {
                bean: unresolved.bean.clone(),
                member: unresolved.member.clone(),
                target: unresolved.target.clone(),
            },
            Self::AwareFailed { type_name, message } => DependencyError::AwareCallbackFailed {
                type_name: type_name.clone(),
                message: message.clone(),
            },
        }
    }
}

/// 组件装配报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulationReport {
    /// 按注册顺序排列的组件
    pub registered: Vec<RegisteredBean>,
    /// 装配过程中的问题
    pub issues: Vec<PopulationIssue>,
    /// 收到容器引用的容器感知对象数量
    pub aware_notified: usize,
}

impl PopulationReport {
    /// 已注册组件数量
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// 是否没有任何问题
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// 未解析的注入点
    pub fn unresolved(&self) -> impl Iterator<Item = &UnresolvedInjection> {
        self.issues.iter().filter_map(|issue| match issue {
            PopulationIssue::UnresolvedInjection(unresolved) => Some(unresolved),
            _ => None,
        })
    }

    /// 把所有问题转换为错误列表
    pub fn errors(&self) -> Vec<DependencyError> {
        self.issues.iter().map(PopulationIssue::to_error).collect()
    }
}

/// 已执行的初始化器
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutedInitializer {
    /// 类型名称
    pub type_name: String,
    /// 生效的顺序
    pub order: i32,
    /// 是否成功
    pub succeeded: bool,
}

/// 初始化器失败阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializerPhase {
    /// 创建实例
    Creation,
    /// 执行 init
    Init,
}

/// 初始化器失败记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitializerFailure {
    /// 类型名称
    pub type_name: String,
    /// 生效的顺序
    pub order: i32,
    /// 失败阶段
    pub phase: InitializerPhase,
    /// 失败原因
    pub message: String,
}

impl InitializerFailure {
    /// 转换为生命周期错误
    pub fn to_error(&self) -> LifecycleError {
        match self.phase {
            InitializerPhase::Creation => LifecycleError::InitializerCreationFailed {
                type_name: self.type_name.clone(),
                source: self.message.clone().into(),
            },
            InitializerPhase::Init => LifecycleError::InitializerFailed {
                type_name: self.type_name.clone(),
                order: self.order,
                source: self.message.clone().into(),
            },
        }
    }
}

/// 启动编排报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LifecycleReport {
    /// 按执行顺序排列的初始化器
    pub executed: Vec<ExecutedInitializer>,
    /// 失败记录
    pub failures: Vec<InitializerFailure>,
}

impl LifecycleReport {
    /// 执行顺序（类型名称）
    pub fn execution_order(&self) -> Vec<&str> {
        self.executed
            .iter()
            .map(|executed| executed.type_name.as_str())
            .collect()
    }

    /// 是否全部成功
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
