//! 自动装配解析器
//!
//! 显式指定名称的注入点只按名称查找；未指定名称的注入点按注册顺序
//! 选择第一个类型兼容的组件（包括组件自身）。

use di_abstractions::{BeanLookup, DependencyResolver, UnresolvedInjection};
use infrastructure_common::InjectionPoint;
use tracing::{debug, warn};

/// 自动装配解析器
#[derive(Debug, Default, Clone, Copy)]
pub struct AutowireResolver;

impl AutowireResolver {
    /// 创建解析器
    pub fn new() -> Self {
        Self
    }
}

impl DependencyResolver for AutowireResolver {
    fn inject(
        &self,
        owner: &str,
        points: Vec<InjectionPoint<'_>>,
        lookup: &dyn BeanLookup,
    ) -> Vec<UnresolvedInjection> {
        let mut unresolved = Vec::new();

        for point in points {
            let candidate = match point.qualifier() {
                Some(name) => lookup.view_by_name(name, point.target_type()),
                None => lookup.first_view_of(point.target_type()),
            };

            match candidate {
                Some(view) => {
                    if point.accept(view) {
                        debug!("注入依赖: {}.{} <- {}", owner, point.member(), point.target_type_name());
                    } else {
                        debug!("注入点已赋值，忽略: {}.{}", owner, point.member());
                    }
                }
                None => {
                    warn!(
                        "未找到可注入的组件: {}.{} (类型: {}, 名称: {:?})",
                        owner,
                        point.member(),
                        point.target_type_name(),
                        point.qualifier()
                    );
                    unresolved.push(UnresolvedInjection {
                        bean: owner.to_string(),
                        member: point.member().to_string(),
                        target: point.target_type_name().to_string(),
                        qualifier: point.qualifier().map(str::to_string),
                    });
                }
            }
        }

        unresolved
    }
}
