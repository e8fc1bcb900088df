//! 依赖解析器抽象接口
//!
//! 解析器为组件实例上的注入点查找并写入依赖，查找只面向已注册的组件表。

use crate::definition::BeanView;
use crate::report::UnresolvedInjection;
use infrastructure_common::InjectionPoint;
use std::any::TypeId;

/// 组件查找 trait
///
/// 装配期间由组件表实现，解析器只通过它访问已注册的组件。
pub trait BeanLookup {
    /// 按名称查找并转换为指定类型视图
    fn view_by_name(&self, name: &str, target: TypeId) -> Option<BeanView>;

    /// 按注册顺序查找第一个兼容指定类型的视图
    fn first_view_of(&self, target: TypeId) -> Option<BeanView>;
}

/// 依赖解析器 trait
pub trait DependencyResolver: Send + Sync {
    /// 为一个组件的注入点写入依赖，返回未能解析的注入点
    fn inject(
        &self,
        owner: &str,
        points: Vec<InjectionPoint<'_>>,
        lookup: &dyn BeanLookup,
    ) -> Vec<UnresolvedInjection>;
}
