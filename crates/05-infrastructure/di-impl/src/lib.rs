//! # 依赖注入具体实现
//!
//! 提供组件容器、自动装配解析器、容器感知传播器和启动编排器的实现

pub mod aware;
pub mod container;
pub mod discovery;
pub mod lifecycle;
pub mod resolver;
pub mod table;

pub use aware::{AwareOutcome, AwarenessPropagator};
pub use container::{BeanContainer, CONTAINER_INIT_ORDER};
pub use discovery::{CatalogDiscovery, StaticDiscovery};
pub use lifecycle::{LifecycleOrchestrator, OrderedInitializer};
pub use resolver::AutowireResolver;
pub use table::{BeanEntry, BeanTable};
