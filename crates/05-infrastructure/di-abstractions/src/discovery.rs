//! 组件发现抽象接口
//!
//! 发现源只负责按扫描范围返回候选定义，是一个无副作用的查询。

use crate::definition::{AwareDefinition, BeanDefinition, InitializerDefinition};
use infrastructure_common::TypeInfo;

/// 组件发现器 trait
pub trait ComponentDiscovery: Send + Sync {
    /// 发现带组件标记的候选类型
    fn discover_beans(&self, scope: &ScanScope) -> Vec<BeanDefinition>;

    /// 发现实现了初始化能力的候选类型
    fn discover_initializers(&self, scope: &ScanScope) -> Vec<InitializerDefinition>;

    /// 发现实现了容器感知能力的候选类型
    fn discover_aware(&self, scope: &ScanScope) -> Vec<AwareDefinition>;
}

/// 扫描范围
///
/// 按模块路径前缀过滤候选类型。包含列表为空时表示不限制。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanScope {
    /// 包含的模块路径前缀
    pub include_prefixes: Vec<String>,
    /// 排除的模块路径前缀
    pub exclude_prefixes: Vec<String>,
}

impl ScanScope {
    /// 不限制范围
    pub fn all() -> Self {
        Self::default()
    }

    /// 只扫描指定模块路径之下的类型
    pub fn package<S: Into<String>>(prefix: S) -> Self {
        Self::default().include(prefix)
    }

    /// 添加包含前缀，空白前缀被忽略
    pub fn include<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        if !prefix.trim().is_empty() {
            self.include_prefixes.push(prefix.trim().to_string());
        }
        self
    }

    /// 添加排除前缀
    pub fn exclude<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        if !prefix.trim().is_empty() {
            self.exclude_prefixes.push(prefix.trim().to_string());
        }
        self
    }

    /// 是否不限制范围
    pub fn is_unrestricted(&self) -> bool {
        self.include_prefixes.is_empty() && self.exclude_prefixes.is_empty()
    }

    /// 类型是否落在扫描范围内
    pub fn matches(&self, type_info: &TypeInfo) -> bool {
        let included = self.include_prefixes.is_empty()
            || self
                .include_prefixes
                .iter()
                .any(|prefix| type_info.is_under(prefix));
        included
            && !self
                .exclude_prefixes
                .iter()
                .any(|prefix| type_info.is_under(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod billing {
        pub struct Invoice;
        pub mod internal {
            pub struct Ledger;
        }
    }

    mod billing_archive {
        pub struct ClosedInvoice;
    }

    struct Outside;

    #[test]
    fn test_unrestricted_scope_matches_everything() {
        let scope = ScanScope::all();
        assert!(scope.is_unrestricted());
        assert!(scope.matches(&TypeInfo::of::<Outside>()));
    }

    #[test]
    fn test_include_and_exclude_prefixes() {
        let base = module_path!();
        let scope = ScanScope::package(format!("{base}::billing"))
            .exclude(format!("{base}::billing::internal"));

        assert!(scope.matches(&TypeInfo::of::<billing::Invoice>()));
        assert!(!scope.matches(&TypeInfo::of::<billing::internal::Ledger>()));
        assert!(!scope.matches(&TypeInfo::of::<Outside>()));
    }

    #[test]
    fn test_sibling_module_with_shared_prefix_is_not_matched() {
        let base = module_path!();
        let included = ScanScope::package(format!("{base}::billing"));
        assert!(included.matches(&TypeInfo::of::<billing::Invoice>()));
        assert!(!included.matches(&TypeInfo::of::<billing_archive::ClosedInvoice>()));

        let excluded = ScanScope::all().exclude(format!("{base}::billing"));
        assert!(!excluded.matches(&TypeInfo::of::<billing::internal::Ledger>()));
        assert!(excluded.matches(&TypeInfo::of::<billing_archive::ClosedInvoice>()));
    }

    #[test]
    fn test_blank_prefixes_are_ignored() {
        let scope = ScanScope::package("  ").exclude("");
        assert!(scope.is_unrestricted());
    }
}
