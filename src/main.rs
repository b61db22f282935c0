// main.rs — 程序入口
// 流程：校验输入 -> 拼列表页地址 -> 抓取链接 -> 并发下载

mod cli;
mod config;
mod downloader;
mod error;
mod listing;
mod logging;
mod validate;

#[cfg(test)]
mod test_server;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cli::Cli;
use config::AppConfig;
use downloader::Downloader;
use error::{Error, Result};
use std::process::ExitCode;
use tracing::{debug, info};

/// 所有下载任务都调度在同一个线程上，只在网络和文件 I/O 处交替执行
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // 输入错误按 clap 的用法错误退出
        Err(Error::InvalidInput { field, message }) => {
            debug!(field, "rejected input");
            Cli::command().error(ErrorKind::ValueValidation, message).exit()
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    validate::validate(&cli.resolution, &cli.year, &cli.month)?;

    let config = AppConfig::load(cli.config.as_deref(), cli.output_dir.as_deref())?;
    debug!(?config, "configuration loaded");

    let url = listing::build_url(&config.base_url, &cli.year, &cli.month)?;
    info!("Fetching listing page {}", url);

    // 列表页请求不跳过证书校验
    let listing_client = reqwest::Client::builder()
        .user_agent(config.download.user_agent.as_str())
        .build()
        .map_err(Error::Client)?;
    let links = listing::get_links(&listing_client, &url, &cli.resolution).await?;
    info!("Found {} links for {}", links.len(), cli.resolution);

    let destination = config.destination(&cli.year, &cli.month);
    info!("Saving to {}", destination.display());

    let downloader = Downloader::new(&config.download)?;
    downloader.download_all(&links, &destination).await?;

    Ok(())
}
