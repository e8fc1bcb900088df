//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件定义、发现和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`BeanContext`] - 组件上下文接口
//! - [`ComponentDiscovery`] - 组件发现接口
//! - [`DependencyResolver`] - 依赖解析器接口
//! - [`BeanDefinition`] - 组件定义

pub mod catalog;
pub mod container;
pub mod definition;
pub mod discovery;
pub mod report;
pub mod resolver;

pub use catalog::*;
pub use container::*;
pub use definition::*;
pub use discovery::*;
pub use report::*;
pub use resolver::*;
