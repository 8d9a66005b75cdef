// logging.rs - 日志初始化
// 日志写到 stderr，stdout 只留给运行摘要和子命令输出

use tracing_subscriber::EnvFilter;

/// 安装全局 tracing 订阅器
///
/// 默认级别为 `spotlight=info`，`verbose` 时提升到 debug；
/// 设置了 `RUST_LOG` 时以环境变量为准。
pub fn init(verbose: bool) {
    let default = if verbose { "spotlight=debug" } else { "spotlight=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
