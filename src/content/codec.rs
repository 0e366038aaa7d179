//! 内容的 JSON 序列化格式
//!
//! 存储格式为 JSON 数组，顺序有意义，每个元素带 `kind` 标签：
//!
//! ```json
//! [
//!   { "kind": "title", "id": "…", "title": "About me" },
//!   { "kind": "link",  "id": "…", "title": "Blog", "url": "https://example.com" }
//! ]
//! ```

use std::fmt;

use serde::Serialize;

use super::block::ContentBlock;
use super::list::ContentList;

/// 已序列化、可直接写入存储的页面内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SerializedContent(String);

impl SerializedContent {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SerializedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn serialize_content(list: &ContentList) -> Result<SerializedContent, serde_json::Error> {
    serde_json::to_string(list).map(SerializedContent)
}

pub fn deserialize_content(json: &str) -> Result<ContentList, serde_json::Error> {
    serde_json::from_str::<Vec<ContentBlock>>(json).map(ContentList::from_blocks)
}

/// 解析数据库中的内容列：NULL、空串和 JSON `null` 都视为没有内容
pub fn parse_stored_content(raw: Option<&str>) -> Result<Option<ContentList>, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(json) => deserialize_content(json).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BlockKind;

    #[test]
    fn test_roundtrip_preserves_order_ids_and_fields() {
        let list = ContentList::from_blocks(vec![
            ContentBlock::title_block("About"),
            ContentBlock::link_block("Blog", "https://blog.example"),
            ContentBlock::link_block("Mail", "mailto:me@example.com"),
        ]);

        let json = serialize_content(&list).unwrap();
        let back = deserialize_content(json.as_str()).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_legacy_array_is_readable() {
        let legacy = r#"[{"title":"Hi","id":"1"},{"title":"Site","url":"https://x.co","id":"2"}]"#;
        let list = deserialize_content(legacy).unwrap();
        let kinds: Vec<_> = list.blocks().map(|b| b.kind()).collect();
        assert_eq!(kinds, [BlockKind::Title, BlockKind::Link]);

        // 重新写出时带上 kind 标签
        let rewritten = serialize_content(&list).unwrap();
        assert!(rewritten.as_str().contains(r#""kind":"link""#));
    }

    #[test]
    fn test_parse_stored_content_empty_forms() {
        assert_eq!(parse_stored_content(None).unwrap(), None);
        assert_eq!(parse_stored_content(Some("")).unwrap(), None);
        assert_eq!(parse_stored_content(Some("null")).unwrap(), None);
        assert_eq!(
            parse_stored_content(Some("[]")).unwrap(),
            Some(ContentList::new())
        );
        assert!(parse_stored_content(Some("{not json")).is_err());
    }
}
