// downloader.rs - 批量下载调度
// 按接口每页最多 4 张的限制拆分批次，批次之间串行，批次内并发下载

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::naming::image_file_name;
use crate::source::model::{BatchInfo, Item};
use crate::source::{BatchSource, ImageFetcher, MAX_BATCH};

/// 把总数拆成每次请求的数量：若干个满批次，加上可能存在的余数批次
pub fn batch_plan(total: usize) -> Vec<usize> {
    let mut plan = vec![MAX_BATCH; total / MAX_BATCH];
    let remainder = total % MAX_BATCH;
    if remainder > 0 {
        plan.push(remainder);
    }
    plan
}

/// 单个 item 的处理结果
#[derive(Debug)]
enum ItemOutcome {
    Saved(PathBuf),
    /// 横版图片地址为空，既不下载也不计为失败
    Skipped,
}

/// 批量下载器
///
/// 元数据来源与图片下载器分开注入，便于替换成测试桩。
pub struct Downloader<S, F> {
    source: Arc<S>,
    fetcher: Arc<F>,
}

impl<S, F> Downloader<S, F>
where
    S: BatchSource + 'static,
    F: ImageFetcher + 'static,
{
    pub fn new(source: Arc<S>, fetcher: Arc<F>) -> Self {
        Self { source, fetcher }
    }

    /// 下载 `total` 张图片到 `save_dir`，返回失败数量
    ///
    /// 元数据请求失败时，该批次请求的数量全部计为失败，然后继续下一批。
    /// 保存目录需要事先存在。
    pub async fn download_images(&self, total: usize, save_dir: &Path) -> usize {
        let mut failures = 0;

        for (index, count) in batch_plan(total).into_iter().enumerate() {
            match self.source.fetch_batch(count).await {
                Ok(batch) => {
                    failures += self.download_batch(batch, save_dir).await;
                }
                Err(e) => {
                    warn!(batch = index + 1, count, error = %e, "获取图片批次信息失败");
                    failures += count;
                }
            }
        }

        failures
    }

    /// 并发处理一个批次中的所有 item，全部结束后返回失败数量
    pub async fn download_batch(&self, batch: BatchInfo, save_dir: &Path) -> usize {
        let mut tasks = JoinSet::new();

        for item in batch.into_items() {
            let fetcher = Arc::clone(&self.fetcher);
            let save_dir = save_dir.to_path_buf();
            tasks.spawn(async move { process_item(fetcher.as_ref(), &item, &save_dir).await });
        }

        let mut failures = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(ItemOutcome::Saved(path))) => {
                    debug!(path = %path.display(), "item 已保存");
                }
                Ok(Ok(ItemOutcome::Skipped)) => {}
                Ok(Err(e)) => {
                    warn!(error = %e, "图片处理失败");
                    failures += 1;
                }
                Err(e) => {
                    warn!(error = %e, "下载任务异常退出");
                    failures += 1;
                }
            }
        }

        failures
    }
}

/// 解析 item 并下载横版图片
async fn process_item<F>(fetcher: &F, item: &Item, save_dir: &Path) -> Result<ItemOutcome>
where
    F: ImageFetcher + ?Sized,
{
    let info = item.decode()?;
    let ad = &info.ad;

    let Some(url) = ad.landscape_url() else {
        info!(entity_id = %ad.entity_id, "横版图片地址为空，跳过");
        return Ok(ItemOutcome::Skipped);
    };

    let path = save_dir.join(image_file_name(ad, url));
    debug!(entity_id = %ad.entity_id, copyright = %ad.copyright, "准备下载");

    fetcher.fetch_image(url, &path).await?;
    Ok(ItemOutcome::Saved(path))
}
