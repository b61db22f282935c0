// downloader.rs — 并发批量下载模块
// 所有链接共用一个 reqwest::Client（内部有连接池），每个链接一个任务，
// 单个任务失败只记日志，不影响其他任务，也不让整批失败

use crate::config::DownloadSettings; // 下载相关配置
use crate::error::{DownloadError, Error, Result};
use std::path::{Path, PathBuf}; // 路径相关类型
use std::sync::Arc; // 原子引用计数，多个任务共享同一个信号量
use tokio::fs::File; // tokio 提供的异步文件操作
use tokio::io::AsyncWriteExt; // 异步写入 trait，提供 write_all() 等方法
use tokio::sync::Semaphore; // 异步信号量，用于限制并发数
use tokio::task::JoinSet; // 一组任务的集合，可以逐个等待完成
use tracing::{debug, error, info};

/// 单个链接的下载结果
#[derive(Debug)]
pub struct DownloadOutcome {
    pub link: String,
    /// 成功时为写入的文件路径
    pub result: std::result::Result<PathBuf, DownloadError>,
}

/// 批量下载器
///
/// `max_concurrent` 为 `None` 时每个链接立即各起一个任务；
/// 为 `Some(n)` 时用信号量把同时进行中的下载限制在 n 个。
#[derive(Clone)]
pub struct Downloader {
    client: reqwest::Client,
    limit: Option<Arc<Semaphore>>,
}

impl Downloader {
    pub fn new(settings: &DownloadSettings) -> Result<Self> {
        // 目标站点的证书有问题，默认跳过校验（可在配置中关闭）
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(Error::Client)?;

        Ok(Self::with_client(client, settings.max_concurrent))
    }

    pub fn with_client(client: reqwest::Client, max_concurrent: Option<usize>) -> Self {
        Self {
            client,
            // 0 和 None 一样表示不限制
            limit: max_concurrent
                .filter(|n| *n > 0)
                .map(|n| Arc::new(Semaphore::new(n))),
        }
    }

    /// 把所有链接下载到 `destination`
    ///
    /// 先确保目录存在（目录创建失败是整批唯一会返回的错误），然后在等待任何一个任务之前
    /// 把全部任务都启动起来。每个任务结束后在这里统一记日志，所有任务都结束才返回。
    pub async fn download_all(
        &self,
        links: &[String],
        destination: &Path,
    ) -> Result<Vec<DownloadOutcome>> {
        // create_dir_all 对已存在的目录什么也不做
        tokio::fs::create_dir_all(destination)
            .await
            .map_err(Error::Batch)?;

        let mut tasks = JoinSet::new();
        for link in links {
            // reqwest::Client 的 clone 只是增加引用计数，连接池仍是同一个
            let client = self.client.clone();
            let limit = self.limit.clone();
            let link = link.clone();
            let destination = destination.to_path_buf();

            // async move 把上面克隆出来的值的所有权移动进任务
            tasks.spawn(async move {
                // 拿到许可才开始下载，_permit 在任务结束时释放
                let _permit = match &limit {
                    Some(semaphore) => semaphore.acquire().await.ok(),
                    None => None,
                };
                let result = download_file(&client, &link, &destination).await;
                DownloadOutcome { link, result }
            });
        }
        debug!(count = links.len(), "download tasks started");

        // join_next() 按完成顺序返回，不保证与 links 顺序一致
        let mut outcomes = Vec::with_capacity(links.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    report(&outcome);
                    outcomes.push(outcome);
                }
                // 任务 panic 也只是记下来
                Err(e) => error!("Download task aborted: {}", e),
            }
        }

        Ok(outcomes)
    }
}

/// 把单个任务的结果写进日志，下载失败只会出现在这里
fn report(outcome: &DownloadOutcome) {
    match &outcome.result {
        Ok(path) => {
            // to_string_lossy() 把 OsStr 转为字符串，非法 UTF-8 用 U+FFFD 替换
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("File {} downloaded successfully", name);
        }
        Err(e) => error!("Failed to download file {}: {}", outcome.link, e),
    }
}

/// 下载单个文件：请求 -> 检查状态码 -> 取文件名 -> 流式写盘（覆盖已有文件）
///
/// 写到一半失败不会清理已写入的部分。
async fn download_file(
    client: &reqwest::Client,
    link: &str,
    destination: &Path,
) -> std::result::Result<PathBuf, DownloadError> {
    // 相对链接（如 "a.jpg"）在这里就会失败
    let url = reqwest::Url::parse(link)
        .map_err(|e| DownloadError::InvalidUrl(format!("{}: {}", link, e)))?;

    // ? 会把 reqwest::Error 通过 #[from] 转成 DownloadError::Request
    let mut response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status(status));
    }

    let file_name = file_name_of(&url).ok_or(DownloadError::NoFileName)?;
    let save_path = destination.join(file_name);

    // File::create() 如果文件已存在会截断覆盖
    let mut file = File::create(&save_path).await?;
    // chunk() 每次返回响应体的一块，读完返回 None
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    // tokio 的 File 写入在后台线程完成，flush 等待其真正写完
    file.flush().await?;

    Ok(save_path)
}

/// URL 路径的最后一段，空段（以 / 结尾）视为没有文件名
fn file_name_of(url: &reqwest::Url) -> Option<&str> {
    // path_segments() 按 '/' 分割路径（不含查询串），next_back() 取最后一段
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
}
