use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// 内容块类型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BlockKind {
    Title,
    Link,
}

/// 内容块中可编辑的字段
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BlockField {
    Title,
    Url,
}

impl BlockField {
    /// `title` 两种块都有，`url` 只属于链接块
    pub fn applies_to(self, kind: BlockKind) -> bool {
        match self {
            BlockField::Title => true,
            BlockField::Url => kind == BlockKind::Link,
        }
    }

    pub fn fields_of(kind: BlockKind) -> &'static [BlockField] {
        match kind {
            BlockKind::Title => &[BlockField::Title],
            BlockKind::Link => &[BlockField::Title, BlockField::Url],
        }
    }
}

/// 页面内容块
///
/// 序列化时总是带显式的 `kind` 标签；反序列化同时兼容旧的无标签格式
/// （有 `url` 字段即为链接块，缺少 `id` 时补一个新的）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentBlock {
    Title { id: String, title: String },
    Link { id: String, title: String, url: String },
}

fn new_block_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ContentBlock {
    /// 创建一个空白块，分配新的 id
    pub fn new(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Title => ContentBlock::Title {
                id: new_block_id(),
                title: String::new(),
            },
            BlockKind::Link => ContentBlock::Link {
                id: new_block_id(),
                title: String::new(),
                url: String::new(),
            },
        }
    }

    pub fn title_block(title: impl Into<String>) -> Self {
        ContentBlock::Title {
            id: new_block_id(),
            title: title.into(),
        }
    }

    pub fn link_block(title: impl Into<String>, url: impl Into<String>) -> Self {
        ContentBlock::Link {
            id: new_block_id(),
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Title { .. } => BlockKind::Title,
            ContentBlock::Link { .. } => BlockKind::Link,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ContentBlock::Title { id, .. } | ContentBlock::Link { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentBlock::Title { title, .. } | ContentBlock::Link { title, .. } => title,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ContentBlock::Title { .. } => None,
            ContentBlock::Link { url, .. } => Some(url),
        }
    }

    /// 读取字段值，字段不适用于该块时返回 `None`
    pub fn field(&self, field: BlockField) -> Option<&str> {
        match field {
            BlockField::Title => Some(self.title()),
            BlockField::Url => self.url(),
        }
    }

    pub(crate) fn field_mut(&mut self, field: BlockField) -> Option<&mut String> {
        match (self, field) {
            (ContentBlock::Title { title, .. }, BlockField::Title)
            | (ContentBlock::Link { title, .. }, BlockField::Title) => Some(title),
            (ContentBlock::Link { url, .. }, BlockField::Url) => Some(url),
            (ContentBlock::Title { .. }, BlockField::Url) => None,
        }
    }
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(default)]
    kind: Option<BlockKind>,
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    url: Option<String>,
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = RawBlock::deserialize(deserializer)?;
        let id = match raw.id {
            Some(id) if !id.is_empty() => id,
            _ => new_block_id(),
        };

        match (raw.kind, raw.url) {
            (Some(BlockKind::Title), None) | (None, None) => Ok(ContentBlock::Title {
                id,
                title: raw.title,
            }),
            (Some(BlockKind::Link), Some(url)) | (None, Some(url)) => Ok(ContentBlock::Link {
                id,
                title: raw.title,
                url,
            }),
            (Some(BlockKind::Link), None) => Err(D::Error::custom("link block is missing `url`")),
            (Some(BlockKind::Title), Some(_)) => {
                Err(D::Error::custom("title block must not carry `url`"))
            }
        }
    }
}

/// 单个块的字段错误：字段 -> 错误信息，空表示没有错误
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockErrors(BTreeMap<BlockField, String>);

impl BlockErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: BlockField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// `None` 清除该字段的错误
    pub fn set(&mut self, field: BlockField, message: Option<String>) {
        match message {
            Some(msg) => {
                self.0.insert(field, msg);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_blocks_have_distinct_ids() {
        let a = ContentBlock::new(BlockKind::Link);
        let b = ContentBlock::new(BlockKind::Link);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.url(), Some(""));
        assert_eq!(ContentBlock::new(BlockKind::Title).url(), None);
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!(BlockField::from_str("title").unwrap(), BlockField::Title);
        assert_eq!(BlockField::from_str("url").unwrap(), BlockField::Url);
        assert!(BlockField::from_str("href").is_err());
        assert_eq!(BlockKind::Link.to_string(), "link");
    }

    #[test]
    fn test_field_applicability() {
        assert!(BlockField::Title.applies_to(BlockKind::Title));
        assert!(BlockField::Url.applies_to(BlockKind::Link));
        assert!(!BlockField::Url.applies_to(BlockKind::Title));

        let mut block = ContentBlock::new(BlockKind::Title);
        assert!(block.field_mut(BlockField::Url).is_none());
        assert_eq!(block.field(BlockField::Url), None);
    }

    #[test]
    fn test_tagged_serialization() {
        let block = ContentBlock::Link {
            id: "b1".into(),
            title: "Site".into(),
            url: "https://x.co".into(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "link", "id": "b1", "title": "Site", "url": "https://x.co"})
        );
    }

    #[test]
    fn test_legacy_untagged_reading() {
        let link: ContentBlock =
            serde_json::from_str(r#"{"id":"a","title":"T","url":"https://x.co"}"#).unwrap();
        assert_eq!(link.kind(), BlockKind::Link);
        assert_eq!(link.id(), "a");

        let title: ContentBlock = serde_json::from_str(r#"{"title":"Heading"}"#).unwrap();
        assert_eq!(title.kind(), BlockKind::Title);
        assert!(!title.id().is_empty());
    }

    #[test]
    fn test_inconsistent_tags_rejected() {
        assert!(
            serde_json::from_str::<ContentBlock>(r#"{"kind":"link","id":"a","title":"T"}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<ContentBlock>(
                r#"{"kind":"title","id":"a","title":"T","url":"https://x.co"}"#
            )
            .is_err()
        );
        assert!(serde_json::from_str::<ContentBlock>(r#"{"kind":"image","title":"T"}"#).is_err());
    }

    #[test]
    fn test_block_errors_set_and_clear() {
        let mut errors = BlockErrors::new();
        errors.set(BlockField::Url, Some("Invalid URL".into()));
        assert_eq!(errors.get(BlockField::Url), Some("Invalid URL"));
        errors.set(BlockField::Url, None);
        assert!(errors.is_empty());
    }
}
