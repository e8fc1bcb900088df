//! 组件容器实现
//!
//! 容器在第一次被访问时装配，整个生命周期内只装配一次：
//!
//! 1. 从发现源获取范围内的组件候选
//! 2. 逐个实例化并按逻辑名称注册，名称冲突时先注册者保留
//! 3. 为每个已注册实例注入依赖
//! 4. 把容器引用交给容器感知对象
//! 5. 标记就绪并唤醒等待者
//!
//! 其他线程在装配期间的访问会阻塞到装配结束；装配线程在构造函数或回调中
//! 重入时直接读取已构建的部分。

use crate::aware::AwarenessPropagator;
use crate::resolver::AutowireResolver;
use crate::table::{BeanEntry, BeanTable};
use di_abstractions::{
    BeanContext, BeanDefinition, BeanView, ComponentDiscovery, ContainerAware, ContainerConfig,
    DependencyResolver, PopulationIssue, PopulationReport, RegisteredBean,
};
use infrastructure_common::{panic_message, BoxError, DependencyError, DependencyResult, Initializable};
use once_cell::sync::OnceCell;
use parking_lot::{Condvar, Mutex, RwLock};
use std::any::{Any, TypeId};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// 容器作为初始化器时的执行顺序
pub const CONTAINER_INIT_ORDER: i32 = 1;

/// 装配状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopulationState {
    Idle,
    Populating(ThreadId),
    Ready,
}

/// 组件容器
pub struct BeanContainer {
    discovery: Arc<dyn ComponentDiscovery>,
    resolver: Arc<dyn DependencyResolver>,
    config: ContainerConfig,
    ready: AtomicBool,
    state: Mutex<PopulationState>,
    ready_signal: Condvar,
    staging: RwLock<BeanTable>,
    table: OnceCell<BeanTable>,
    report: OnceCell<PopulationReport>,
    standalone_aware: OnceCell<Vec<Arc<dyn ContainerAware>>>,
    self_ref: Weak<BeanContainer>,
}

/// 装配结束（包括 panic 展开）时标记就绪
struct ReadyOnDrop<'a> {
    container: &'a BeanContainer,
}

impl Drop for ReadyOnDrop<'_> {
    fn drop(&mut self) {
        let container = self.container;
        container.report.get_or_init(PopulationReport::default);
        let mut state = container.state.lock();
        *state = PopulationState::Ready;
        container.ready.store(true, Ordering::Release);
        container.ready_signal.notify_all();
    }
}

impl BeanContainer {
    /// 使用默认解析器创建容器
    pub fn new(discovery: Arc<dyn ComponentDiscovery>, config: ContainerConfig) -> Arc<Self> {
        Self::with_resolver(discovery, config, Arc::new(AutowireResolver::new()))
    }

    /// 使用自定义解析器创建容器
    pub fn with_resolver(
        discovery: Arc<dyn ComponentDiscovery>,
        config: ContainerConfig,
        resolver: Arc<dyn DependencyResolver>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            discovery,
            resolver,
            config,
            ready: AtomicBool::new(false),
            state: Mutex::new(PopulationState::Idle),
            ready_signal: Condvar::new(),
            staging: RwLock::new(BeanTable::default()),
            table: OnceCell::new(),
            report: OnceCell::new(),
            standalone_aware: OnceCell::new(),
            self_ref: self_ref.clone(),
        })
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 确保容器已装配并返回装配报告
    ///
    /// 装配线程在装配过程中重入调用时返回 [`DependencyError::PopulationInProgress`]。
    pub fn populate(&self) -> DependencyResult<&PopulationReport> {
        self.await_ready();
        self.report.get().ok_or(DependencyError::PopulationInProgress)
    }

    /// 装配报告，未装配时返回 `None`（不触发装配）
    pub fn population_report(&self) -> Option<&PopulationReport> {
        self.report.get()
    }

    /// 独立创建的容器感知对象数量
    pub fn standalone_aware_count(&self) -> usize {
        self.standalone_aware.get().map_or(0, Vec::len)
    }

    fn await_ready(&self) {
        if self.ready.load(Ordering::Acquire) {
            return;
        }

        let current = thread::current().id();
        let mut state = self.state.lock();
        let started = Instant::now();
        loop {
            match *state {
                PopulationState::Ready => return,
                PopulationState::Populating(owner) if owner == current => return,
                PopulationState::Populating(_) => {
                    let waited = self
                        .ready_signal
                        .wait_for(&mut state, self.config.ready_wait_log_interval);
                    if waited.timed_out() {
                        debug!("等待容器装配完成，已等待 {:?}", started.elapsed());
                    }
                }
                PopulationState::Idle => {
                    *state = PopulationState::Populating(current);
                    drop(state);
                    self.run_population();
                    return;
                }
            }
        }
    }

    fn run_population(&self) {
        let _ready = ReadyOnDrop { container: self };
        let started = Instant::now();
        info!("开始装配组件容器");

        let mut report = PopulationReport::default();
        for definition in self.discovery.discover_beans(&self.config.scan_scope) {
            self.register_candidate(definition, &mut report);
        }

        let staged = std::mem::take(&mut *self.staging.write());
        let table = self.table.get_or_init(|| staged);

        self.inject_all(table, &mut report);
        self.propagate_awareness(table, &mut report);

        report.registered = table
            .entries()
            .iter()
            .map(|entry| RegisteredBean {
                name: entry.name().to_string(),
                type_name: entry.definition().type_info().type_name,
            })
            .collect();

        info!(
            "组件容器装配完成，注册了 {} 个组件，{} 个问题，耗时 {:?}",
            report.registered.len(),
            report.issues.len(),
            started.elapsed()
        );
        let _ = self.report.set(report);
    }

    fn register_candidate(&self, definition: BeanDefinition, report: &mut PopulationReport) {
        let name = definition.logical_name();
        let type_name = definition.type_info().type_name;

        let instance = match catch_unwind(AssertUnwindSafe(|| definition.instantiate())) {
            Ok(Ok(instance)) => instance,
            Ok(Err(err)) => {
                error!("创建组件实例失败: {} - {}", type_name, err);
                report.issues.push(PopulationIssue::InstantiationFailed {
                    type_name: type_name.to_string(),
                    message: err.to_string(),
                });
                return;
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("创建组件实例时发生 panic: {} - {}", type_name, message);
                report.issues.push(PopulationIssue::InstantiationFailed {
                    type_name: type_name.to_string(),
                    message,
                });
                return;
            }
        };

        let inserted = self
            .staging
            .write()
            .insert(BeanEntry::new(name.clone(), definition, instance));
        match inserted {
            Ok(()) => debug!("注册组件: {} ({})", name, type_name),
            Err(_) => {
                warn!("组件名称重复，忽略后注册的组件: {} ({})", name, type_name);
                report.issues.push(PopulationIssue::DuplicateName {
                    name,
                    type_name: type_name.to_string(),
                });
            }
        }
    }

    fn inject_all(&self, table: &BeanTable, report: &mut PopulationReport) {
        for entry in table.entries() {
            let injected = catch_unwind(AssertUnwindSafe(|| {
                let points = entry.definition().injection_points(entry.instance().as_ref());
                self.resolver.inject(entry.name(), points, table)
            }));

            match injected {
                Ok(unresolved) => report
                    .issues
                    .extend(unresolved.into_iter().map(PopulationIssue::UnresolvedInjection)),
                Err(payload) => {
                    error!("注入依赖时发生 panic: {} - {}", entry.name(), panic_message(payload.as_ref()));
                }
            }
        }
    }

    fn propagate_awareness(&self, table: &BeanTable, report: &mut PopulationReport) {
        let candidates = self.discovery.discover_aware(&self.config.scan_scope);
        if candidates.is_empty() {
            return;
        }

        let Some(container) = self.self_ref.upgrade() else {
            warn!("容器已释放，跳过容器感知回调");
            return;
        };
        let context: Arc<dyn BeanContext> = container;

        let outcome = AwarenessPropagator.propagate(candidates, table, &context);
        report.aware_notified = outcome.notified;
        report.issues.extend(outcome.issues);
        let _ = self.standalone_aware.set(outcome.standalone);
    }

    fn with_table<R>(&self, read: impl FnOnce(&BeanTable) -> R) -> R {
        self.await_ready();
        match self.table.get() {
            Some(table) => read(table),
            None => read(&*self.staging.read()),
        }
    }
}

impl BeanContext for BeanContainer {
    fn get_bean(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.with_table(|table| table.get(name).map(|entry| entry.instance().clone()))
    }

    fn get_bean_view(&self, name: &str, target: TypeId) -> Option<BeanView> {
        self.with_table(|table| table.get(name).and_then(|entry| entry.view(target)))
    }

    fn find_bean_view(&self, target: TypeId) -> Option<BeanView> {
        self.with_table(|table| table.entries().iter().find_map(|entry| entry.view(target)))
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.with_table(|table| table.contains(name))
    }

    fn bean_names(&self) -> Vec<String> {
        self.with_table(BeanTable::names)
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl Initializable for BeanContainer {
    fn init(&self) -> Result<(), BoxError> {
        self.populate()?;
        Ok(())
    }
}

impl std::fmt::Debug for BeanContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanContainer")
            .field("config", &self.config)
            .field("ready", &self.is_ready())
            .finish()
    }
}
