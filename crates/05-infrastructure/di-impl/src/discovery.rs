//! 组件发现实现
//!
//! - [`StaticDiscovery`] 显式登记的候选，按登记顺序返回
//! - [`CatalogDiscovery`] 读取组件宏在启动时登记的全局目录

use di_abstractions::{
    global_catalog, AwareDefinition, BeanDefinition, ComponentDiscovery, InitializerDefinition,
    ScanScope,
};
use tracing::debug;

/// 静态组件发现器
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    beans: Vec<BeanDefinition>,
    initializers: Vec<InitializerDefinition>,
    aware: Vec<AwareDefinition>,
}

impl StaticDiscovery {
    /// 创建空的发现器
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记组件候选
    pub fn with_bean(mut self, definition: BeanDefinition) -> Self {
        self.beans.push(definition);
        self
    }

    /// 登记初始化器候选
    pub fn with_initializer(mut self, definition: InitializerDefinition) -> Self {
        self.initializers.push(definition);
        self
    }

    /// 登记容器感知候选
    pub fn with_aware(mut self, definition: AwareDefinition) -> Self {
        self.aware.push(definition);
        self
    }
}

impl ComponentDiscovery for StaticDiscovery {
    fn discover_beans(&self, scope: &ScanScope) -> Vec<BeanDefinition> {
        self.beans
            .iter()
            .filter(|definition| scope.matches(definition.type_info()))
            .cloned()
            .collect()
    }

    fn discover_initializers(&self, scope: &ScanScope) -> Vec<InitializerDefinition> {
        self.initializers
            .iter()
            .filter(|definition| scope.matches(definition.type_info()))
            .cloned()
            .collect()
    }

    fn discover_aware(&self, scope: &ScanScope) -> Vec<AwareDefinition> {
        self.aware
            .iter()
            .filter(|definition| scope.matches(definition.type_info()))
            .cloned()
            .collect()
    }
}

/// 全局目录发现器
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogDiscovery;

impl CatalogDiscovery {
    /// 创建发现器
    pub fn new() -> Self {
        Self
    }
}

impl ComponentDiscovery for CatalogDiscovery {
    fn discover_beans(&self, scope: &ScanScope) -> Vec<BeanDefinition> {
        let beans: Vec<_> = global_catalog()
            .beans
            .into_iter()
            .filter(|definition| scope.matches(definition.type_info()))
            .collect();
        debug!("从全局目录发现 {} 个组件候选", beans.len());
        beans
    }

    fn discover_initializers(&self, scope: &ScanScope) -> Vec<InitializerDefinition> {
        global_catalog()
            .initializers
            .into_iter()
            .filter(|definition| scope.matches(definition.type_info()))
            .collect()
    }

    fn discover_aware(&self, scope: &ScanScope) -> Vec<AwareDefinition> {
        global_catalog()
            .aware
            .into_iter()
            .filter(|definition| scope.matches(definition.type_info()))
            .collect()
    }
}
