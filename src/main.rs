// main.rs - 程序入口
// 负责初始化异步运行时、解析命令行参数、准备保存目录并启动批量下载

mod cli;
mod config;
mod dir;
mod downloader;
mod error;
mod logging;
mod naming;
mod source;

// 初始化多语言支持，嵌入 locales 目录下的所有翻译
rust_i18n::i18n!("locales");

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Commands, DownloadArgs};
use config::AppConfig;
use downloader::Downloader;
use rust_i18n::t;
use source::spotlight::SpotlightClient;
use std::sync::Arc;
use tracing::{error, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 自动检测系统语言并设置
    let locale = std::env::var("LANG").unwrap_or_else(|_| "en".to_string());
    if locale.starts_with("zh") {
        rust_i18n::set_locale("zh-CN");
    } else {
        rust_i18n::set_locale("en");
    }

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = AppConfig::new();

    match &cli.command {
        None => handle_download(&config, &cli.download).await?,
        Some(Commands::Config { action }) => handle_config(&mut config, action)?,
        Some(Commands::Completions { shell }) => {
            generate(
                *shell,
                &mut Cli::command(),
                "spotlight",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// 默认动作：清空并创建保存目录，然后批量下载
///
/// 只有保存目录创建失败才返回错误；下载失败只体现在最后的统计里。
async fn handle_download(
    config: &AppConfig,
    args: &DownloadArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = args.count.unwrap_or(config.count);
    let save_dir = args
        .dir
        .as_deref()
        .map(config::expand_path)
        .unwrap_or_else(|| config.save_dir.clone());
    let clean = args.clean.map(|s| s.enabled()).unwrap_or(config.clean);

    println!(
        "{}",
        t!("download_start", count => total, path => save_dir.display())
    );

    if clean {
        if let Err(e) = dir::clean(&save_dir) {
            warn!(error = %e, "{}", t!("clean_failed"));
        }
    }

    dir::create(&save_dir)
        .map_err(|e| t!("error_create_dir", path => save_dir.display(), reason => e))?;

    let failures = match SpotlightClient::new(config.http_settings()) {
        Ok(client) => {
            let client = Arc::new(client);
            Downloader::new(Arc::clone(&client), client)
                .download_images(total, &save_dir)
                .await
        }
        Err(e) => {
            error!(error = %e, "{}", t!("client_failed"));
            total
        }
    };

    println!(
        "{}",
        t!(
            "download_summary",
            ok => total.saturating_sub(failures),
            failed => failures
        )
    );
    Ok(())
}

/// 处理 config 子命令：查看或修改配置
fn handle_config(
    config: &mut AppConfig,
    action: &cli::ConfigAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        cli::ConfigAction::Show => {
            println!("{}", t!("config_title"));
            println!(
                "{}",
                t!("config_path", path => config.config_path.display())
            );
            println!(
                "{}",
                t!("config_save_dir", path => config.save_dir.display())
            );
            println!("{}", t!("config_count", count => config.count));
            println!("{}", t!("config_clean", clean => config.clean));
            println!("{}", t!("config_endpoint", endpoint => config.api.endpoint));
        }
        cli::ConfigAction::Schema => {
            println!("{}", AppConfig::get_schema());
        }
        cli::ConfigAction::Dump => {
            println!("{}", config.to_toml());
        }
        cli::ConfigAction::Set { key, value } => {
            config.set(key, value)?;
            config.save()?;
            println!("{}", t!("config_updated", key => key, value => value));
        }
    }
    Ok(())
}
