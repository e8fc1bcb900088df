//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn Bean Container 的公共 traits、注入原语和错误类型。
//!
//! ## 核心组件
//!
//! - [`Injectable`] - 声明注入点的组件 trait
//! - [`Autowired`] - 自动装配字段
//! - [`Initializable`] - 参与有序启动的初始化器 trait
//! - [`TypeInfo`] - 组件类型元数据
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统，不依赖运行时反射
//! - 组件单例一次创建，装配后只读
//! - 单个组件的失败不会中断整体装配

pub mod errors;
pub mod injection;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use injection::*;
pub use lifecycle::*;
pub use metadata::*;
