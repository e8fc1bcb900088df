//! 组件宏集成测试
//!
//! 宏生成的登记函数把候选写入进程级的全局目录，每个测试通过扫描范围
//! 只选取自己模块下的候选。

use component_macros::{bean, container_aware, initializer, Injectable};
use di_abstractions::{
    global_catalog, BeanContext, BeanContextExt, ContainerAware, ContainerConfig, ContainerHandle,
    ScanScope,
};
use di_impl::{BeanContainer, CatalogDiscovery, LifecycleOrchestrator};
use infrastructure_common::{Autowired, BoxError, Initializable, LifecycleState};
use infrastructure_composition::{Application, ContainerServer, Server};
use std::sync::{Arc, Mutex};

use greeting::Greeter as _;

mod greeting {
    use super::*;

    pub trait Greeter: Send + Sync {
        fn greet(&self, who: &str) -> String;
    }

    #[bean(name = "englishGreeter", provides(dyn Greeter))]
    #[derive(Default, Injectable)]
    pub struct EnglishGreeter;

    impl Greeter for EnglishGreeter {
        fn greet(&self, who: &str) -> String {
            format!("Hello, {who}")
        }
    }

    #[bean(name = "frenchGreeter", provides(dyn Greeter))]
    #[derive(Default, Injectable)]
    pub struct FrenchGreeter;

    impl Greeter for FrenchGreeter {
        fn greet(&self, who: &str) -> String {
            format!("Bonjour, {who}")
        }
    }

    #[bean(name = "welcomeService")]
    #[derive(Default, Injectable)]
    #[autowired(setter = set_fallback, target = EnglishGreeter)]
    pub struct WelcomeService {
        #[autowired(name = "frenchGreeter")]
        pub primary: Autowired<dyn Greeter>,
        #[autowired(name = "missingGreeter")]
        pub absent: Autowired<dyn Greeter>,
        pub fallback: Mutex<Option<Arc<EnglishGreeter>>>,
    }

    impl WelcomeService {
        fn set_fallback(&self, greeter: Arc<EnglishGreeter>) {
            if let Ok(mut slot) = self.fallback.lock() {
                *slot = Some(greeter);
            }
        }
    }

    pub fn scope() -> ScanScope {
        ScanScope::package(module_path!())
    }
}

mod startup {
    use super::*;

    pub static JOURNAL: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

    fn record(label: &'static str) -> Result<(), BoxError> {
        JOURNAL.lock().map_err(|_| "journal poisoned")?.push(label);
        Ok(())
    }

    #[initializer]
    #[derive(Default)]
    pub struct ReportPublisher;

    impl Initializable for ReportPublisher {
        fn init(&self) -> Result<(), BoxError> {
            record("report")
        }
    }

    #[initializer(order = 10)]
    #[derive(Default)]
    pub struct CacheWarmup;

    impl Initializable for CacheWarmup {
        fn init(&self) -> Result<(), BoxError> {
            record("cache")
        }
    }

    #[initializer(order = -3)]
    #[derive(Default)]
    pub struct SchemaMigration;

    impl Initializable for SchemaMigration {
        fn init(&self) -> Result<(), BoxError> {
            record("schema")
        }
    }

    pub fn scope() -> ScanScope {
        ScanScope::package(module_path!())
    }
}

mod awareness {
    use super::*;

    #[bean(name = "beanInspector")]
    #[container_aware]
    #[derive(Default, Injectable)]
    pub struct BeanInspector {
        pub container: ContainerHandle,
    }

    impl ContainerAware for BeanInspector {
        fn set_container(&self, container: Arc<dyn BeanContext>) {
            self.container.set(&container);
        }
    }

    #[container_aware]
    #[derive(Default)]
    pub struct DetachedWatcher {
        pub container: ContainerHandle,
    }

    impl ContainerAware for DetachedWatcher {
        fn set_container(&self, container: Arc<dyn BeanContext>) {
            self.container.set(&container);
        }
    }

    pub fn scope() -> ScanScope {
        ScanScope::package(module_path!())
    }
}

fn container_for(scope: ScanScope) -> Arc<BeanContainer> {
    BeanContainer::new(
        Arc::new(CatalogDiscovery::new()),
        ContainerConfig::default().with_scan_scope(scope),
    )
}

/// 测试宏在启动时登记候选
#[test]
fn test_macros_register_candidates_in_global_catalog() {
    let catalog = global_catalog();

    let greeting = greeting::scope();
    assert_eq!(
        catalog
            .beans
            .iter()
            .filter(|definition| greeting.matches(definition.type_info()))
            .count(),
        3
    );
    assert!(catalog
        .beans
        .iter()
        .any(|definition| definition.declared_name() == Some("welcomeService")));

    let startup = startup::scope();
    let mut orders: Vec<_> = catalog
        .initializers
        .iter()
        .filter(|definition| startup.matches(definition.type_info()))
        .map(|definition| definition.declared_order())
        .collect();
    orders.sort();
    assert_eq!(orders, vec![None, Some(-3), Some(10)]);

    let awareness = awareness::scope();
    assert_eq!(
        catalog
            .aware
            .iter()
            .filter(|definition| awareness.matches(definition.type_info()))
            .count(),
        2
    );
}

/// 测试按名称和按类型注入
#[test]
fn test_catalog_container_wires_macro_beans() {
    let container = container_for(greeting::scope());
    let report = container.populate().unwrap();
    assert_eq!(report.registered_count(), 3);

    let service = container
        .get_bean_as::<greeting::WelcomeService>("welcomeService")
        .unwrap();
    let primary = service.primary.get().unwrap();
    assert_eq!(primary.greet("Ada"), "Bonjour, Ada");

    // 名称不存在时不回退到按类型查找
    assert!(!service.absent.is_resolved());
    let unresolved: Vec<_> = report.unresolved().collect();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].member, "absent");

    // 未指定名称的属性注入按类型查找
    let fallback = service.fallback.lock().unwrap().clone().unwrap();
    assert_eq!(fallback.greet("Ada"), "Hello, Ada");

    let greeter = container
        .get_bean_of_type::<dyn greeting::Greeter>()
        .unwrap();
    assert!(["Hello, Bob", "Bonjour, Bob"].contains(&greeter.greet("Bob").as_str()));
}

/// 测试宏登记的初始化器按顺序执行
#[test]
fn test_macro_initializers_run_in_declared_order() {
    let orchestrator = LifecycleOrchestrator::new(Arc::new(CatalogDiscovery::new()), startup::scope());

    let report = orchestrator.run().unwrap();
    assert!(report.is_clean());
    assert_eq!(orchestrator.state(), LifecycleState::Done);

    let order = report.execution_order();
    assert_eq!(order.len(), 3);
    assert!(order[0].ends_with("SchemaMigration"));
    assert!(order[1].ends_with("CacheWarmup"));
    assert!(order[2].ends_with("ReportPublisher"));
    assert_eq!(
        *startup::JOURNAL.lock().unwrap(),
        vec!["schema", "cache", "report"]
    );

    assert!(orchestrator.run().is_none());
}

/// 测试容器感知对象收到容器引用
#[test]
fn test_container_aware_macro_receives_container() {
    let container = container_for(awareness::scope());
    let report = container.populate().unwrap();
    assert_eq!(report.aware_notified, 2);
    assert_eq!(container.standalone_aware_count(), 1);

    let inspector = container
        .get_bean_as::<awareness::BeanInspector>("beanInspector")
        .unwrap();
    let context = inspector.container.get().unwrap();
    assert_eq!(context.bean_names(), vec!["beanInspector".to_string()]);
    assert!(context.is_ready());
}

/// 测试通过应用入口启动宏登记的组件
#[tokio::test]
async fn test_application_scans_macro_package() {
    let application = Application::builder()
        .scan_package(module_path!().to_string() + "::greeting")
        .build()
        .unwrap();

    let server = ContainerServer::from(application);
    server.pre_start().await.unwrap();
    server.start().await.unwrap();

    let context = server.application().context();
    assert!(context.contains_bean("englishGreeter"));
    let service = context
        .get_bean_as::<greeting::WelcomeService>("welcomeService")
        .unwrap();
    assert!(service.primary.is_resolved());
}
