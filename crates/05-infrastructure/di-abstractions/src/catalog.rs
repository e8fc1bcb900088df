//! 全局候选目录
//!
//! `component-macros` 生成的代码在程序启动时（`ctor`）把定义登记到这里，
//! `CatalogDiscovery` 再从中读取。目录只保存候选定义，不保存任何实例。

use crate::definition::{AwareDefinition, BeanDefinition, InitializerDefinition};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// 全局候选目录
static GLOBAL_CANDIDATE_CATALOG: Lazy<RwLock<CandidateCatalog>> =
    Lazy::new(|| RwLock::new(CandidateCatalog::default()));

/// 候选定义目录
#[derive(Debug, Clone, Default)]
pub struct CandidateCatalog {
    /// 组件候选
    pub beans: Vec<BeanDefinition>,
    /// 初始化器候选
    pub initializers: Vec<InitializerDefinition>,
    /// 容器感知候选
    pub aware: Vec<AwareDefinition>,
}

impl CandidateCatalog {
    /// 候选总数
    pub fn len(&self) -> usize {
        self.beans.len() + self.initializers.len() + self.aware.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 登记组件候选
pub fn register_bean(definition: BeanDefinition) {
    GLOBAL_CANDIDATE_CATALOG.write().beans.push(definition);
}

/// 登记初始化器候选
pub fn register_initializer(definition: InitializerDefinition) {
    GLOBAL_CANDIDATE_CATALOG.write().initializers.push(definition);
}

/// 登记容器感知候选
pub fn register_aware(definition: AwareDefinition) {
    GLOBAL_CANDIDATE_CATALOG.write().aware.push(definition);
}

/// 获取全局目录的快照
pub fn global_catalog() -> CandidateCatalog {
    GLOBAL_CANDIDATE_CATALOG.read().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::Injectable;

    #[derive(Default)]
    struct CatalogSample;

    impl Injectable for CatalogSample {}

    #[test]
    fn test_registered_bean_appears_in_snapshot() {
        let before = global_catalog().beans.len();
        register_bean(BeanDefinition::of_default::<CatalogSample>().named("catalogSample"));

        let snapshot = global_catalog();
        assert_eq!(snapshot.beans.len(), before + 1);
        assert!(snapshot
            .beans
            .iter()
            .any(|definition| definition.logical_name() == "catalogSample"));
        assert!(!snapshot.is_empty());
    }
}
