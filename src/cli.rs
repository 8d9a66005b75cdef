// cli.rs - 命令行接口定义模块
// 不带子命令时直接下载；config / completions 子命令用于维护工具本身

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// 下载 Windows 聚焦壁纸
///
/// 从聚焦接口批量获取当日壁纸并保存到本地目录。
#[derive(Parser, Debug)]
#[command(name = "spotlight")]
#[command(version)]
#[command(author)]
#[command(about = "下载Windows聚焦壁纸")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub download: DownloadArgs,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 下载参数，未指定时使用配置文件中的值
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// 每次下载的图片数量（默认 4）
    #[arg(short = 'n', long = "count", value_name = "N")]
    pub count: Option<usize>,

    /// 保存图片的目录（默认 images）
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<String>,

    /// 是否清空保存图片的目录（默认 yes）
    #[arg(short = 'c', long = "clean", value_enum, value_name = "yes|no")]
    pub clean: Option<Switch>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Switch {
    Yes,
    No,
}

impl Switch {
    pub fn enabled(self) -> bool {
        self == Switch::Yes
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 配置管理操作
    ///
    /// 用法示例:
    ///   spotlight config show
    ///   spotlight config set count 8
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// 生成 shell 补全脚本（支持 bash, zsh, fish, elvish, powershell）
    ///
    /// 用法示例：
    ///   spotlight completions zsh > ~/.zsh/completions/_spotlight
    Completions {
        /// 目标 shell 类型
        shell: Shell,
    },
}

/// 配置管理操作
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// 查看当前生效的配置
    Show,
    /// 生成配置文件对应的 JSON Schema
    Schema,
    /// 以 TOML 格式打印当前完整配置内容
    Dump,
    /// 设置配置项的值 (支持: count, dir, clean)
    Set {
        /// 要设置的键
        key: String,
        /// 要设置的值
        value: String,
    },
}
