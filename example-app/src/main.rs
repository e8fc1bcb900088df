//! # 示例应用程序
//!
//! 演示如何用组件宏登记组件，并通过容器服务入口完成装配与有序启动

use anyhow::Context;
use clap::Parser;
use component_macros::{bean, container_aware, initializer, Injectable};
use di_abstractions::{BeanContext, BeanContextExt, ContainerAware, ContainerHandle};
use infrastructure_common::{Autowired, BoxError, Initializable};
use infrastructure_composition::{Application, ContainerServer, LoggingConfig, Server};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn 组件容器示例应用")]
struct Args {
    /// 扫描的模块前缀，可以重复指定
    #[arg(long = "scope")]
    scopes: Vec<String>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json: bool,

    /// 打印装配报告
    #[arg(long)]
    report: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = LoggingConfig::development()
        .with_level(parse_log_level(&args.log_level))
        .with_json(args.json);

    let mut builder = Application::builder().with_logging(logging);
    for scope in &args.scopes {
        builder = builder.scan_package(scope.clone());
    }
    let application = builder.build().context("构建应用失败")?;

    let server = ContainerServer::from(application);
    server.pre_start().await.context("启动编排失败")?;
    server.start().await.context("服务启动失败")?;

    let application = server.application();
    if let Some(report) = application.population_report() {
        for issue in &report.issues {
            warn!("装配问题: {:?}", issue);
        }
        if args.report {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }

    let context = application.context();
    if let Some(directory) = context.get_bean_as::<BeanDirectory>("beanDirectory") {
        for name in directory.names() {
            info!("已注册组件: {}", name);
        }
    }
    demonstrate_greeting(&context);

    let metrics = application.get_metrics().await;
    info!(
        "启动完成: {} 个组件, {} 个初始化器, 耗时 {:?}",
        metrics.registered_beans,
        metrics.initializers_executed,
        metrics.startup_duration()
    );
    Ok(())
}

/// 演示按名称获取组件并调用
fn demonstrate_greeting(context: &Arc<dyn BeanContext>) {
    match context.get_bean_as::<GreetingService>("greetingService") {
        Some(service) => {
            for who in ["Ada", "Grace"] {
                info!("{}", service.welcome(who));
            }
        }
        None => warn!("greetingService 不在扫描范围内"),
    }
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

// 示例组件

/// 问候语
pub trait Greeter: Send + Sync {
    /// 生成问候语
    fn greet(&self, who: &str) -> String;
}

/// 英文问候
#[bean(name = "englishGreeter", provides(dyn Greeter))]
#[derive(Default, Injectable)]
pub struct EnglishGreeter;

impl Greeter for EnglishGreeter {
    fn greet(&self, who: &str) -> String {
        format!("Hello, {who}!")
    }
}

/// 访问计数
#[bean(name = "visitCounter")]
#[derive(Default, Injectable)]
pub struct VisitCounter {
    visits: Mutex<u64>,
}

impl VisitCounter {
    fn next(&self) -> u64 {
        let mut visits = self.visits.lock().unwrap_or_else(|e| e.into_inner());
        *visits += 1;
        *visits
    }
}

/// 问候服务
#[bean(name = "greetingService")]
#[derive(Default, Injectable)]
pub struct GreetingService {
    #[autowired(name = "englishGreeter")]
    greeter: Autowired<dyn Greeter>,
    #[autowired]
    counter: Autowired<VisitCounter>,
}

impl GreetingService {
    /// 生成欢迎信息
    pub fn welcome(&self, who: &str) -> String {
        let greeting = self
            .greeter
            .get()
            .map_or_else(|| format!("Hi, {who}"), |greeter| greeter.greet(who));
        let visit = self.counter.get().map_or(0, |counter| counter.next());
        format!("{greeting} (第 {visit} 位访客)")
    }
}

/// 组件清单
#[bean(name = "beanDirectory")]
#[container_aware]
#[derive(Default, Injectable)]
pub struct BeanDirectory {
    container: ContainerHandle,
}

impl ContainerAware for BeanDirectory {
    fn set_container(&self, container: Arc<dyn BeanContext>) {
        self.container.set(&container);
    }
}

impl BeanDirectory {
    /// 列出容器中的组件名称
    pub fn names(&self) -> Vec<String> {
        self.container
            .get()
            .map(|container| container.bean_names())
            .unwrap_or_default()
    }
}

/// 启动时预热问候模板
#[initializer(order = 10)]
#[derive(Default)]
pub struct GreetingWarmup;

impl Initializable for GreetingWarmup {
    fn init(&self) -> Result<(), BoxError> {
        info!("问候模板预热完成: {}", EnglishGreeter.greet("warmup"));
        Ok(())
    }
}

/// 未指定顺序的初始化器最后执行
#[initializer]
#[derive(Default)]
pub struct ReadinessBanner;

impl Initializable for ReadinessBanner {
    fn init(&self) -> Result<(), BoxError> {
        info!("示例应用已就绪");
        Ok(())
    }
}
