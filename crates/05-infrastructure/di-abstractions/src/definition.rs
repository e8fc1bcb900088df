//! 组件定义
//!
//! 组件、初始化器和容器感知对象的声明式描述。定义由发现源提供，
//! 可以手工构建，也可以由 `component-macros` 在编译期生成。

use crate::container::ContainerAware;
use infrastructure_common::{
    resolve_bean_name, resolve_order, BoxError, Initializable, Injectable, InjectionPoint, TypeInfo,
};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 容器持有的组件实例
pub type SharedBean = Arc<dyn Any + Send + Sync>;

/// 组件的类型视图，内部为 `Arc<T>`
pub type BeanView = Box<dyn Any + Send + Sync>;

/// 组件工厂函数类型
pub type BeanFactoryFn = Arc<dyn Fn() -> Result<SharedBean, BoxError> + Send + Sync>;

/// 视图转换函数类型
pub type ViewCasterFn = Arc<dyn Fn(SharedBean) -> Option<BeanView> + Send + Sync>;

/// 注入点枚举函数类型
pub type InjectionPointsFn = for<'a> fn(&'a (dyn Any + Send + Sync)) -> Vec<InjectionPoint<'a>>;

/// 初始化器工厂函数类型
pub type InitializerFactoryFn = Arc<dyn Fn() -> Result<Arc<dyn Initializable>, BoxError> + Send + Sync>;

/// 容器感知对象工厂函数类型
pub type AwareFactoryFn = Arc<dyn Fn() -> Result<Arc<dyn ContainerAware>, BoxError> + Send + Sync>;

/// 把已注册的组件实例转换为容器感知对象
pub type AwareReuseFn = fn(SharedBean) -> Option<Arc<dyn ContainerAware>>;

fn injection_points_of<T: Injectable>(bean: &(dyn Any + Send + Sync)) -> Vec<InjectionPoint<'_>> {
    bean.downcast_ref::<T>()
        .map(|typed| typed.injection_points())
        .unwrap_or_default()
}

fn reuse_as_aware<T: ContainerAware>(bean: SharedBean) -> Option<Arc<dyn ContainerAware>> {
    bean.downcast::<T>()
        .ok()
        .map(|aware| aware as Arc<dyn ContainerAware>)
}

/// 组件类型视图描述
#[derive(Clone)]
pub struct BeanViewDescriptor {
    target: TypeInfo,
    caster: ViewCasterFn,
}

impl BeanViewDescriptor {
    /// 视图的目标类型
    pub fn target(&self) -> &TypeInfo {
        &self.target
    }

    /// 把实例转换为该视图
    pub fn cast(&self, bean: &SharedBean) -> Option<BeanView> {
        (self.caster)(bean.clone())
    }
}

impl fmt::Debug for BeanViewDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanViewDescriptor")
            .field("target", &self.target.type_name)
            .finish()
    }
}

/// 组件定义
#[derive(Clone)]
pub struct BeanDefinition {
    type_info: TypeInfo,
    name: Option<String>,
    factory: BeanFactoryFn,
    injection_points: InjectionPointsFn,
    views: Vec<BeanViewDescriptor>,
}

impl BeanDefinition {
    /// 使用无参工厂函数创建组件定义
    pub fn new<T, F>(factory: F) -> Self
    where
        T: Injectable,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let self_view = BeanViewDescriptor {
            target: TypeInfo::of::<T>(),
            caster: Arc::new(|bean: SharedBean| {
                bean.downcast::<T>().ok().map(|typed| Box::new(typed) as BeanView)
            }),
        };

        Self {
            type_info: TypeInfo::of::<T>(),
            name: None,
            factory: Arc::new(move || factory().map(|bean| Arc::new(bean) as SharedBean)),
            injection_points: injection_points_of::<T>,
            views: vec![self_view],
        }
    }

    /// 使用 `Default` 创建组件定义
    pub fn of_default<T>() -> Self
    where
        T: Injectable + Default,
    {
        Self::new(|| Ok(T::default()))
    }

    /// 设置逻辑名称，空白名称视为未设置
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = (!name.trim().is_empty()).then_some(name);
        self
    }

    /// 声明组件可以作为另一种类型（通常是 trait object）注入
    pub fn provides<T, U>(mut self, upcast: fn(Arc<T>) -> Arc<U>) -> Self
    where
        T: Send + Sync + 'static,
        U: ?Sized + Send + Sync + 'static,
    {
        if self.views.iter().any(|view| view.target.id == TypeId::of::<U>()) {
            return self;
        }

        self.views.push(BeanViewDescriptor {
            target: TypeInfo::of::<U>(),
            caster: Arc::new(move |bean: SharedBean| {
                bean.downcast::<T>()
                    .ok()
                    .map(|typed| Box::new(upcast(typed)) as BeanView)
            }),
        });
        self
    }

    /// 组件类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 显式声明的名称
    pub fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 逻辑名称：显式名称或完全限定类型名
    pub fn logical_name(&self) -> String {
        resolve_bean_name(self.name.as_deref(), &self.type_info)
    }

    /// 调用工厂函数创建实例
    pub fn instantiate(&self) -> Result<SharedBean, BoxError> {
        (self.factory)()
    }

    /// 枚举实例上的注入点
    pub fn injection_points<'a>(&self, bean: &'a (dyn Any + Send + Sync)) -> Vec<InjectionPoint<'a>> {
        (self.injection_points)(bean)
    }

    /// 组件支持的类型视图（第一个总是自身类型）
    pub fn views(&self) -> &[BeanViewDescriptor] {
        &self.views
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("type_name", &self.type_info.type_name)
            .field("name", &self.name)
            .field("views", &self.views)
            .field("factory", &"<function>")
            .finish()
    }
}

/// 初始化器定义
#[derive(Clone)]
pub struct InitializerDefinition {
    type_info: TypeInfo,
    order: Option<i32>,
    factory: InitializerFactoryFn,
}

impl InitializerDefinition {
    /// 使用无参工厂函数创建初始化器定义
    pub fn new<T, F>(factory: F) -> Self
    where
        T: Initializable,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            order: None,
            factory: Arc::new(move || factory().map(|init| Arc::new(init) as Arc<dyn Initializable>)),
        }
    }

    /// 使用 `Default` 创建初始化器定义
    pub fn of_default<T>() -> Self
    where
        T: Initializable + Default,
    {
        Self::new(|| Ok(T::default()))
    }

    /// 声明执行顺序，数值越小越先执行
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// 初始化器类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 声明的顺序
    pub fn declared_order(&self) -> Option<i32> {
        self.order
    }

    /// 生效的顺序，未声明时为最低优先级
    pub fn order(&self) -> i32 {
        resolve_order(self.order)
    }

    /// 创建初始化器实例
    pub fn instantiate(&self) -> Result<Arc<dyn Initializable>, BoxError> {
        (self.factory)()
    }
}

impl fmt::Debug for InitializerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitializerDefinition")
            .field("type_name", &self.type_info.type_name)
            .field("order", &self.order)
            .finish()
    }
}

/// 容器感知对象定义
#[derive(Clone)]
pub struct AwareDefinition {
    type_info: TypeInfo,
    factory: AwareFactoryFn,
    reuse: AwareReuseFn,
}

impl AwareDefinition {
    /// 使用无参工厂函数创建容器感知定义
    pub fn new<T, F>(factory: F) -> Self
    where
        T: ContainerAware,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            factory: Arc::new(move || factory().map(|aware| Arc::new(aware) as Arc<dyn ContainerAware>)),
            reuse: reuse_as_aware::<T>,
        }
    }

    /// 使用 `Default` 创建容器感知定义
    pub fn of_default<T>() -> Self
    where
        T: ContainerAware + Default,
    {
        Self::new(|| Ok(T::default()))
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 创建独立实例
    pub fn instantiate(&self) -> Result<Arc<dyn ContainerAware>, BoxError> {
        (self.factory)()
    }

    /// 复用已注册的同类型组件实例
    pub fn reuse(&self, bean: SharedBean) -> Option<Arc<dyn ContainerAware>> {
        (self.reuse)(bean)
    }
}

impl fmt::Debug for AwareDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwareDefinition")
            .field("type_name", &self.type_info.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::BeanContext;
    use infrastructure_common::{Autowired, LOWEST_PRECEDENCE};

    trait Repository: Send + Sync {
        fn table(&self) -> &'static str;
    }

    #[derive(Default)]
    struct UserRepository;

    impl Repository for UserRepository {
        fn table(&self) -> &'static str {
            "users"
        }
    }

    impl Injectable for UserRepository {}

    #[derive(Default)]
    struct UserService {
        repository: Autowired<dyn Repository>,
    }

    impl Injectable for UserService {
        fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
            vec![InjectionPoint::field("repository", &self.repository)]
        }
    }

    #[derive(Default)]
    struct Warmup;

    impl Initializable for Warmup {
        fn init(&self) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Watcher;

    impl ContainerAware for Watcher {
        fn set_container(&self, _container: Arc<dyn BeanContext>) {}
    }

    #[test]
    fn test_logical_name_defaults_to_type_name() {
        let definition = BeanDefinition::of_default::<UserRepository>();
        assert_eq!(definition.logical_name(), std::any::type_name::<UserRepository>());

        let named = BeanDefinition::of_default::<UserRepository>().named("userRepository");
        assert_eq!(named.logical_name(), "userRepository");

        let blank = BeanDefinition::of_default::<UserRepository>().named("  ");
        assert_eq!(blank.declared_name(), None);
    }

    #[test]
    fn test_views_include_self_and_provided_traits() {
        let definition = BeanDefinition::of_default::<UserRepository>()
            .provides(|repo: Arc<UserRepository>| repo as Arc<dyn Repository>)
            .provides(|repo: Arc<UserRepository>| repo as Arc<dyn Repository>);
        assert_eq!(definition.views().len(), 2);

        let bean = definition.instantiate().unwrap();
        let view = definition.views()[1].cast(&bean).unwrap();
        let repository = view.downcast::<Arc<dyn Repository>>().unwrap();
        assert_eq!(repository.table(), "users");

        let self_view = definition.views()[0].cast(&bean).unwrap();
        assert!(self_view.downcast::<Arc<UserRepository>>().is_ok());
    }

    #[test]
    fn test_injection_points_are_enumerated_from_instance() {
        let definition = BeanDefinition::of_default::<UserService>();
        let bean = definition.instantiate().unwrap();
        let points = definition.injection_points(bean.as_ref());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].member(), "repository");
        assert_eq!(points[0].target_type(), TypeId::of::<dyn Repository>());
    }

    #[test]
    fn test_factory_error_is_returned() {
        let definition = BeanDefinition::new::<UserRepository, _>(|| Err("数据库不可用".into()));
        let err = definition.instantiate().err().unwrap();
        assert_eq!(err.to_string(), "数据库不可用");
    }

    #[test]
    fn test_initializer_order_resolution() {
        let unordered = InitializerDefinition::of_default::<Warmup>();
        assert_eq!(unordered.order(), LOWEST_PRECEDENCE);
        assert_eq!(unordered.declared_order(), None);

        let ordered = InitializerDefinition::of_default::<Warmup>().with_order(5);
        assert_eq!(ordered.order(), 5);
        assert!(ordered.instantiate().unwrap().init().is_ok());
    }

    #[test]
    fn test_aware_reuse_matches_concrete_type_only() {
        let definition = AwareDefinition::of_default::<Watcher>();
        let same: SharedBean = Arc::new(Watcher);
        let other: SharedBean = Arc::new(UserRepository);

        assert!(definition.reuse(same).is_some());
        assert!(definition.reuse(other).is_none());
    }
}
