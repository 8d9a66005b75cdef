// model.rs - 聚焦接口响应的数据结构
//
// 接口的 items 里每一项都是一段被转义成字符串的 JSON，
// 因此需要两次解析：先解析外层信封，再逐项解析 item 字段。

use serde::Deserialize;

use crate::error::Result;

/// 接口响应的顶层结构
///
/// 缺失的字段按默认值处理，与接口偶尔省略字段的行为保持兼容。
#[derive(Deserialize, Debug, Default)]
pub struct BatchInfo {
    #[serde(rename = "batchrsp", default)]
    pub response: BatchResponse,
}

#[derive(Deserialize, Debug, Default)]
pub struct BatchResponse {
    #[serde(default)]
    pub ver: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl BatchInfo {
    pub fn version(&self) -> &str {
        &self.response.ver
    }

    pub fn items(&self) -> &[Item] {
        &self.response.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.response.items
    }
}

/// 单个壁纸候选项，唯一字段本身是一段 JSON 字符串
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Item {
    #[serde(default)]
    pub item: String,
}

impl Item {
    /// 第二次解析：把内嵌字符串解码为 ImageInfo
    pub fn decode(&self) -> Result<ImageInfo> {
        Ok(serde_json::from_str(&self.item)?)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ImageInfo {
    #[serde(default)]
    pub ad: Ad,
}

/// 壁纸活动的描述信息
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Ad {
    /// 活动的稳定标识，用作文件名前缀
    pub entity_id: String,
    pub title: String,
    #[allow(dead_code)]
    pub description: String,
    pub copyright: String,
    /// 横版图片，唯一会被下载的版本
    pub landscape_image: ImageAsset,
    #[allow(dead_code)]
    pub portrait_image: ImageAsset,
}

#[derive(Deserialize, Debug, Default)]
pub struct ImageAsset {
    /// 图片地址，可能为空
    #[serde(default)]
    pub asset: String,
}

impl Ad {
    /// 横版图片地址，为空时返回 None
    pub fn landscape_url(&self) -> Option<&str> {
        let url = self.landscape_image.asset.as_str();
        (!url.is_empty()).then_some(url)
    }
}
