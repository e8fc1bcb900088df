//! # Component Macros
//!
//! 这个 crate 提供了用于编译期组件登记的过程宏。生成的代码在程序启动时
//! 通过 `ctor` 把定义登记到 `di_abstractions` 的全局候选目录，使用方需要
//! 依赖 `ctor`、`di-abstractions` 和 `infrastructure-common`。
//!
//! ## 核心宏
//!
//! - [`bean`] - 组件登记
//! - [`Injectable`] - 注入点派生
//! - [`initializer`] - 初始化器登记
//! - [`container_aware`] - 容器感知对象登记
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{bean, initializer, Injectable};
//! use infrastructure_common::{Autowired, BoxError, Initializable};
//!
//! pub trait Mailer: Send + Sync {
//!     fn send(&self, to: &str);
//! }
//!
//! #[bean(name = "smtpMailer", provides(dyn Mailer))]
//! #[derive(Default, Injectable)]
//! pub struct SmtpMailer;
//!
//! #[bean]
//! #[derive(Default, Injectable)]
//! pub struct SignupService {
//!     #[autowired(name = "smtpMailer")]
//!     mailer: Autowired<dyn Mailer>,
//! }
//!
//! #[initializer(order = 10)]
//! #[derive(Default)]
//! pub struct CacheWarmup;
//!
//! impl Initializable for CacheWarmup {
//!     fn init(&self) -> Result<(), BoxError> {
//!         Ok(())
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod bean;
mod injectable;
mod lifecycle;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 组件登记宏
///
/// 把结构体登记为组件候选。结构体需要实现 `Injectable`，未指定工厂函数时
/// 还需要实现 `Default`。
///
/// # 参数
///
/// - `name = "custom_name"` - 逻辑名称（默认为完全限定类型名）
/// - `provides(dyn TraitA, dyn TraitB)` - 可作为这些类型注入
/// - `factory = path::to::fn` - 返回 `Result<Self, BoxError>` 的无参工厂函数
///
/// # 示例
///
/// ```rust,ignore
/// #[bean(name = "userRepository", provides(dyn Repository))]
/// #[derive(Default, Injectable)]
/// pub struct UserRepository;
/// ```
#[proc_macro_attribute]
pub fn bean(args: TokenStream, input: TokenStream) -> TokenStream {
    bean::bean_impl(args, input)
}

/// 注入点派生宏
///
/// 为结构体实现 `Injectable`。
///
/// - 字段：`#[autowired]` 或 `#[autowired(name = "x")]`，字段类型为 `Autowired<T>`
/// - 结构体：`#[autowired(setter = set_x, target = dyn T, name = "x")]`，
///   设置方法签名为 `fn set_x(&self, value: Arc<dyn T>)`
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default, Injectable)]
/// #[autowired(setter = set_clock, target = dyn Clock)]
/// pub struct Scheduler {
///     #[autowired]
///     store: Autowired<Store>,
///     clock: Mutex<Option<Arc<dyn Clock>>>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(autowired))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
}

/// 初始化器登记宏
///
/// 结构体需要实现 `Initializable` 和 `Default`。未指定顺序时最后执行。
///
/// # 示例
///
/// ```rust,ignore
/// #[initializer(order = 5)]
/// #[derive(Default)]
/// pub struct SchemaMigration;
/// ```
#[proc_macro_attribute]
pub fn initializer(args: TokenStream, input: TokenStream) -> TokenStream {
    lifecycle::initializer_impl(args, input)
}

/// 容器感知对象登记宏
///
/// 结构体需要实现 `ContainerAware` 和 `Default`。同一类型也登记为组件时，
/// 容器把引用交给已注册的单例。
#[proc_macro_attribute]
pub fn container_aware(args: TokenStream, input: TokenStream) -> TokenStream {
    lifecycle::container_aware_impl(args, input)
}
