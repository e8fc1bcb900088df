use component_macros::{bean, container_aware, Injectable};
use di_abstractions::{BeanContext, ContainerAware, ContainerHandle};
use infrastructure_common::{Autowired, Injectable as _};
use std::sync::{Arc, Mutex};

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[bean(name = "fixedClock", provides(dyn Clock))]
#[derive(Default, Injectable)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        42
    }
}

#[bean]
#[container_aware]
#[derive(Default, Injectable)]
#[autowired(setter = set_fallback, target = dyn Clock)]
pub struct Scheduler {
    #[autowired(name = "fixedClock")]
    clock: Autowired<dyn Clock>,
    fallback: Mutex<Option<Arc<dyn Clock>>>,
    container: ContainerHandle,
}

impl Scheduler {
    fn set_fallback(&self, clock: Arc<dyn Clock>) {
        *self.fallback.lock().unwrap() = Some(clock);
    }
}

impl ContainerAware for Scheduler {
    fn set_container(&self, container: Arc<dyn BeanContext>) {
        self.container.set(&container);
    }
}

fn main() {
    let scheduler = Scheduler::default();
    assert_eq!(scheduler.injection_points().len(), 2);
    assert!(!scheduler.clock.is_resolved());
}
