// naming.rs - 由壁纸信息生成本地文件名
// 标题和 ID 来自远端，可能包含 `..` 或路径分隔符，落盘前必须清理

use std::path::{Component, Path, PathBuf};

use crate::source::model::Ad;

/// 生成 `{entityId}_{title}{ext}` 形式的相对文件路径
///
/// 扩展名取自图片地址的路径部分（忽略查询串）。
/// 结果经过 `sanitize` 处理，保证不会逃出保存目录。
pub fn image_file_name(ad: &Ad, asset_url: &str) -> PathBuf {
    let raw = format!("{}_{}{}", ad.entity_id, ad.title, url_extension(asset_url));
    sanitize(&raw)
}

/// 先做词法上的路径清理，再删除残留的 `..` 子串
///
/// 清理时丢弃根目录、盘符和 `.`，每个 `..` 抵消它前面的一段。
/// 返回值只含普通路径段，永远是相对路径，可以安全地 join 到保存目录下。
pub fn sanitize(name: &str) -> PathBuf {
    let resolved = lexical_clean(Path::new(name));
    let stripped = resolved.to_string_lossy().replace("..", "");
    let cleaned: PathBuf = Path::new(&stripped)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    // image_file_name 的结果总含 `_`，空结果只会出现在直接调用 sanitize 时
    if cleaned.as_os_str().is_empty() {
        PathBuf::from("_")
    } else {
        cleaned
    }
}

/// 不访问文件系统地解析 `.` 和 `..`，越过开头的 `..` 直接丢弃
fn lexical_clean(path: &Path) -> PathBuf {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                parts.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    parts.into_iter().collect()
}

/// 取图片地址最后一段的扩展名（含点），没有扩展名时返回空串
fn url_extension(url: &str) -> String {
    let path = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
    };
    let last = path.rsplit('/').next().unwrap_or("");

    match last.rfind('.') {
        Some(idx) if idx + 1 < last.len() => last[idx..].to_string(),
        _ => String::new(),
    }
}
