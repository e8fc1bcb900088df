//! 启动编排器
//!
//! 收集初始化器，按顺序值升序排列（相同顺序保持插入顺序），逐个执行一次。

use di_abstractions::{
    ComponentDiscovery, ExecutedInitializer, InitializerFailure, InitializerPhase, LifecycleReport,
    ScanScope,
};
use infrastructure_common::{panic_message, Initializable, LifecycleState};
use once_cell::sync::OnceCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// 带顺序的初始化器
#[derive(Clone)]
pub struct OrderedInitializer {
    type_name: &'static str,
    order: i32,
    initializer: Arc<dyn Initializable>,
}

impl OrderedInitializer {
    /// 包装已创建的初始化器
    pub fn new<T: Initializable>(initializer: Arc<T>, order: i32) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            order,
            initializer,
        }
    }

    /// 类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 执行顺序
    pub fn order(&self) -> i32 {
        self.order
    }
}

impl std::fmt::Debug for OrderedInitializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedInitializer")
            .field("type_name", &self.type_name)
            .field("order", &self.order)
            .finish()
    }
}

/// 按顺序插入，放在第一个顺序值更大的元素之前
fn insert_sorted(queue: &mut Vec<OrderedInitializer>, item: OrderedInitializer) {
    let position = queue
        .iter()
        .position(|queued| queued.order > item.order)
        .unwrap_or(queue.len());
    queue.insert(position, item);
}

/// 编排结束（包括 panic 展开）时进入 Done
struct DoneOnDrop<'a>(&'a AtomicU8);

impl Drop for DoneOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(LifecycleState::Done as u8, Ordering::Release);
    }
}

/// 启动编排器
pub struct LifecycleOrchestrator {
    discovery: Arc<dyn ComponentDiscovery>,
    scope: ScanScope,
    prebuilt: Vec<OrderedInitializer>,
    state: AtomicU8,
    report: OnceCell<LifecycleReport>,
}

impl LifecycleOrchestrator {
    /// 创建编排器
    pub fn new(discovery: Arc<dyn ComponentDiscovery>, scope: ScanScope) -> Self {
        Self {
            discovery,
            scope,
            prebuilt: Vec::new(),
            state: AtomicU8::new(LifecycleState::NotStarted as u8),
            report: OnceCell::new(),
        }
    }

    /// 添加预先创建的初始化器，先于发现的初始化器参与排序
    pub fn with_initializer(mut self, initializer: OrderedInitializer) -> Self {
        self.prebuilt.push(initializer);
        self
    }

    /// 当前状态
    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// 编排报告，未完成时返回 `None`
    pub fn report(&self) -> Option<&LifecycleReport> {
        self.report.get()
    }

    /// 执行启动编排
    ///
    /// 只有第一次调用会执行；其余调用（包括并发调用）立即返回 `None`。
    pub fn run(&self) -> Option<&LifecycleReport> {
        let claimed = self.state.compare_exchange(
            LifecycleState::NotStarted as u8,
            LifecycleState::Running as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        if claimed.is_err() {
            debug!("启动编排已执行，忽略重复调用");
            return None;
        }

        let _done = DoneOnDrop(&self.state);
        let started = Instant::now();
        let mut report = LifecycleReport::default();

        let queue = self.build_queue(&mut report);
        info!("开始执行初始化器，共 {} 个", queue.len());

        for item in queue {
            let outcome = catch_unwind(AssertUnwindSafe(|| item.initializer.init()));
            let message = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(err.to_string()),
                Err(payload) => Some(panic_message(payload.as_ref())),
            };

            match &message {
                None => debug!("初始化器执行完成: {} (order = {})", item.type_name, item.order),
                Some(message) => {
                    error!("初始化器执行失败: {} (order = {}) - {}", item.type_name, item.order, message)
                }
            }

            report.executed.push(ExecutedInitializer {
                type_name: item.type_name.to_string(),
                order: item.order,
                succeeded: message.is_none(),
            });
            if let Some(message) = message {
                report.failures.push(InitializerFailure {
                    type_name: item.type_name.to_string(),
                    order: item.order,
                    phase: InitializerPhase::Init,
                    message,
                });
            }
        }

        info!(
            "启动编排完成，执行 {} 个初始化器，{} 个失败，耗时 {:?}",
            report.executed.len(),
            report.failures.len(),
            started.elapsed()
        );
        Some(self.report.get_or_init(|| report))
    }

    fn build_queue(&self, report: &mut LifecycleReport) -> Vec<OrderedInitializer> {
        let mut queue = Vec::new();
        for prebuilt in &self.prebuilt {
            insert_sorted(&mut queue, prebuilt.clone());
        }

        for candidate in self.discovery.discover_initializers(&self.scope) {
            let type_name = candidate.type_info().type_name;
            let order = candidate.order();
            let created = catch_unwind(AssertUnwindSafe(|| candidate.instantiate()));
            let message = match created {
                Ok(Ok(initializer)) => {
                    insert_sorted(
                        &mut queue,
                        OrderedInitializer {
                            type_name,
                            order,
                            initializer,
                        },
                    );
                    continue;
                }
                Ok(Err(err)) => err.to_string(),
                Err(payload) => panic_message(payload.as_ref()),
            };

            error!("创建初始化器失败: {} - {}", type_name, message);
            report.failures.push(InitializerFailure {
                type_name: type_name.to_string(),
                order,
                phase: InitializerPhase::Creation,
                message,
            });
        }

        queue
    }
}

impl std::fmt::Debug for LifecycleOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleOrchestrator")
            .field("scope", &self.scope)
            .field("prebuilt", &self.prebuilt)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::BoxError;

    struct Noop;

    impl Initializable for Noop {
        fn init(&self) -> Result<(), BoxError> {
            Ok(())
        }
    }

    fn item(order: i32) -> OrderedInitializer {
        OrderedInitializer::new(Arc::new(Noop), order)
    }

    #[test]
    fn test_insert_sorted_is_stable_on_ties() {
        let mut queue = Vec::new();
        for (tag, order) in [(0, 10), (1, 1), (2, i32::MAX), (3, 1), (4, 5)] {
            let mut entry = item(order);
            entry.type_name = ["a", "b", "c", "d", "e"][tag];
            insert_sorted(&mut queue, entry);
        }

        let names: Vec<_> = queue.iter().map(OrderedInitializer::type_name).collect();
        assert_eq!(names, vec!["b", "d", "e", "a", "c"]);
    }

    #[test]
    fn test_negative_orders_run_first() {
        let mut queue = Vec::new();
        insert_sorted(&mut queue, item(0));
        insert_sorted(&mut queue, item(i32::MIN));
        insert_sorted(&mut queue, item(-3));

        let orders: Vec<_> = queue.iter().map(OrderedInitializer::order).collect();
        assert_eq!(orders, vec![i32::MIN, -3, 0]);
    }
}
