//! 依赖注入容器抽象接口
//!
//! 提供组件上下文、容器感知回调以及容器配置

use crate::discovery::ScanScope;
use crate::definition::BeanView;
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// 组件上下文 trait
///
/// 所有查询在容器就绪前都会阻塞，必要时在调用线程上触发装配。
pub trait BeanContext: Send + Sync {
    /// 按逻辑名称获取组件
    fn get_bean(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>>;

    /// 按逻辑名称获取组件的指定类型视图
    ///
    /// 返回值内部为 `Arc<T>`，类型不兼容时返回 `None`。
    fn get_bean_view(&self, name: &str, target: TypeId) -> Option<BeanView>;

    /// 按注册顺序获取第一个兼容指定类型的组件视图
    fn find_bean_view(&self, target: TypeId) -> Option<BeanView>;

    /// 检查是否存在指定名称的组件
    fn contains_bean(&self, name: &str) -> bool;

    /// 按注册顺序列出所有组件名称
    fn bean_names(&self) -> Vec<String>;

    /// 容器是否已就绪（不触发装配）
    fn is_ready(&self) -> bool;
}

/// 组件上下文的类型化查询扩展
pub trait BeanContextExt: BeanContext {
    /// 按名称获取类型化组件
    fn get_bean_as<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        unwrap_view(self.get_bean_view(name, TypeId::of::<T>())?)
    }

    /// 按类型获取第一个兼容的组件
    fn get_bean_of_type<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        unwrap_view(self.find_bean_view(TypeId::of::<T>())?)
    }
}

impl<C: BeanContext + ?Sized> BeanContextExt for C {}

fn unwrap_view<T>(view: BeanView) -> Option<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    view.downcast::<Arc<T>>().ok().map(|bean| *bean)
}

/// 容器感知 trait
///
/// 装配完成后，容器把自身的引用交给实现者。
pub trait ContainerAware: Send + Sync + 'static {
    /// 设置容器引用
    fn set_container(&self, container: Arc<dyn BeanContext>);
}

/// 容器引用持有者
///
/// 容器感知组件用它保存容器引用。内部只保存弱引用，避免组件与容器互相持有。
#[derive(Default)]
pub struct ContainerHandle {
    cell: OnceCell<Weak<dyn BeanContext>>,
}

impl ContainerHandle {
    /// 创建空的持有者
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// 保存容器引用，只有第一次调用生效
    pub fn set(&self, container: &Arc<dyn BeanContext>) -> bool {
        self.cell.set(Arc::downgrade(container)).is_ok()
    }

    /// 获取容器引用，容器已释放或尚未设置时返回 `None`
    pub fn get(&self) -> Option<Arc<dyn BeanContext>> {
        self.cell.get().and_then(Weak::upgrade)
    }

    /// 是否已设置
    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl std::fmt::Debug for ContainerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerHandle")
            .field("set", &self.is_set())
            .finish()
    }
}

/// 容器配置
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// 扫描范围
    pub scan_scope: ScanScope,
    /// 等待装配完成时输出等待日志的间隔
    pub ready_wait_log_interval: Duration,
}

impl ContainerConfig {
    /// 设置扫描范围
    pub fn with_scan_scope(mut self, scope: ScanScope) -> Self {
        self.scan_scope = scope;
        self
    }

    /// 设置等待日志间隔
    pub fn with_ready_wait_log_interval(mut self, interval: Duration) -> Self {
        self.ready_wait_log_interval = interval;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            scan_scope: ScanScope::all(),
            ready_wait_log_interval: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::BeanView;

    /// 只包含一个组件的上下文
    struct SingleBeanContext {
        name: &'static str,
        bean: Arc<u64>,
    }

    impl BeanContext for SingleBeanContext {
        fn get_bean(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>> {
            (name == self.name).then(|| self.bean.clone() as Arc<dyn Any + Send + Sync>)
        }

        fn get_bean_view(&self, name: &str, target: TypeId) -> Option<BeanView> {
            if name == self.name {
                self.find_bean_view(target)
            } else {
                None
            }
        }

        fn find_bean_view(&self, target: TypeId) -> Option<BeanView> {
            (target == TypeId::of::<u64>()).then(|| Box::new(self.bean.clone()) as BeanView)
        }

        fn contains_bean(&self, name: &str) -> bool {
            name == self.name
        }

        fn bean_names(&self) -> Vec<String> {
            vec![self.name.to_string()]
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_typed_lookup_through_extension() {
        let context = SingleBeanContext {
            name: "answer",
            bean: Arc::new(42),
        };

        assert_eq!(*context.get_bean_as::<u64>("answer").unwrap(), 42);
        assert!(context.get_bean_as::<u32>("answer").is_none());
        assert!(context.get_bean_as::<u64>("missing").is_none());
        assert_eq!(*context.get_bean_of_type::<u64>().unwrap(), 42);

        let dynamic: Arc<dyn BeanContext> = Arc::new(context);
        assert_eq!(*dynamic.get_bean_as::<u64>("answer").unwrap(), 42);
    }

    #[test]
    fn test_container_handle_holds_weak_reference() {
        let handle = ContainerHandle::new();
        assert!(handle.get().is_none());

        let context: Arc<dyn BeanContext> = Arc::new(SingleBeanContext {
            name: "answer",
            bean: Arc::new(1),
        });
        assert!(handle.set(&context));
        assert!(!handle.set(&context));
        assert!(handle.get().is_some());

        drop(context);
        assert!(handle.is_set());
        assert!(handle.get().is_none());
    }

    #[test]
    fn test_container_config_defaults() {
        let config = ContainerConfig::default()
            .with_ready_wait_log_interval(Duration::from_millis(50));
        assert_eq!(config.ready_wait_log_interval, Duration::from_millis(50));
        assert!(config.scan_scope.is_unrestricted());
    }
}
