//! 容器感知传播器

use crate::table::BeanTable;
use di_abstractions::{AwareDefinition, BeanContext, ContainerAware, PopulationIssue};
use infrastructure_common::panic_message;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error};

/// 传播结果
#[derive(Default)]
pub struct AwareOutcome {
    /// 成功收到容器引用的对象数量
    pub notified: usize,
    /// 独立创建的实例，由容器持有
    pub standalone: Vec<Arc<dyn ContainerAware>>,
    /// 失败记录
    pub issues: Vec<PopulationIssue>,
}

/// 容器感知传播器
///
/// 同一具体类型已注册为组件时通知该类型的每个单例，否则创建独立实例。
#[derive(Debug, Default, Clone, Copy)]
pub struct AwarenessPropagator;

impl AwarenessPropagator {
    /// 把容器引用交给每个候选对象
    pub fn propagate(
        &self,
        candidates: Vec<AwareDefinition>,
        table: &BeanTable,
        container: &Arc<dyn BeanContext>,
    ) -> AwareOutcome {
        let mut outcome = AwareOutcome::default();

        for candidate in candidates {
            let type_name = candidate.type_info().type_name;

            let registered: Vec<_> = table
                .entries()
                .iter()
                .filter(|entry| entry.definition().type_info().id == candidate.type_info().id)
                .filter_map(|entry| candidate.reuse(entry.instance().clone()))
                .collect();

            if !registered.is_empty() {
                for target in registered {
                    if Self::notify(&target, type_name, container, &mut outcome) {
                        debug!("已设置容器引用: {} (已注册组件)", type_name);
                    }
                }
                continue;
            }

            let target = match catch_unwind(AssertUnwindSafe(|| candidate.instantiate())) {
                Ok(Ok(target)) => target,
                Ok(Err(err)) => {
                    error!("创建容器感知对象失败: {} - {}", type_name, err);
                    outcome.issues.push(PopulationIssue::AwareFailed {
                        type_name: type_name.to_string(),
                        message: err.to_string(),
                    });
                    continue;
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!("创建容器感知对象时发生 panic: {} - {}", type_name, message);
                    outcome.issues.push(PopulationIssue::AwareFailed {
                        type_name: type_name.to_string(),
                        message,
                    });
                    continue;
                }
            };

            if Self::notify(&target, type_name, container, &mut outcome) {
                debug!("已设置容器引用: {} (独立实例)", type_name);
                outcome.standalone.push(target);
            }
        }

        outcome
    }

    /// 调用回调并记录结果，成功时返回 `true`
    fn notify(
        target: &Arc<dyn ContainerAware>,
        type_name: &str,
        container: &Arc<dyn BeanContext>,
        outcome: &mut AwareOutcome,
    ) -> bool {
        match catch_unwind(AssertUnwindSafe(|| target.set_container(container.clone()))) {
            Ok(()) => {
                outcome.notified += 1;
                true
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("容器感知回调失败: {} - {}", type_name, message);
                outcome.issues.push(PopulationIssue::AwareFailed {
                    type_name: type_name.to_string(),
                    message,
                });
                false
            }
        }
    }
}
