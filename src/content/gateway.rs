use async_trait::async_trait;
use tracing::info;

use super::codec::SerializedContent;
use super::list::ContentList;
use super::session::EditorSession;
use crate::errors::Result;

/// 页面内容的持久化网关
///
/// 所有操作都带上所属用户 id，实现方负责归属检查。
/// 传输或存储失败以 `LinkyError` 返回，编辑会话不解释这些错误。
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// 读取页面内容，页面存在但内容为空时返回 `Ok(None)`
    async fn load_content(&self, owner_id: i32, page_id: i32) -> Result<Option<ContentList>>;

    async fn save_content(
        &self,
        owner_id: i32,
        page_id: i32,
        content: SerializedContent,
    ) -> Result<()>;

    /// slug 未被任何页面占用时返回 `true`
    async fn check_slug_available(&self, slug: &str) -> Result<bool>;
}

/// 提交编辑会话并写入存储
///
/// 校验失败时不会触达网关，错误以 `LinkyError::ContentInvalid` 返回。
pub async fn submit_and_save(
    gateway: &dyn ContentGateway,
    owner_id: i32,
    page_id: i32,
    session: &mut EditorSession,
) -> Result<SerializedContent> {
    let serialized = session.submit()?;
    gateway
        .save_content(owner_id, page_id, serialized.clone())
        .await?;
    info!("Saved content for page {} ({} bytes)", page_id, serialized.as_str().len());
    Ok(serialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockField, BlockKind, ContentBlock, parse_stored_content};
    use crate::errors::LinkyError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryGateway {
        pages: Mutex<HashMap<(i32, i32), Option<String>>>,
        saves: Mutex<usize>,
    }

    #[async_trait]
    impl ContentGateway for MemoryGateway {
        async fn load_content(&self, owner_id: i32, page_id: i32) -> Result<Option<ContentList>> {
            let pages = self.pages.lock().unwrap();
            let raw = pages
                .get(&(owner_id, page_id))
                .ok_or_else(|| LinkyError::page_not_found(format!("page {}", page_id)))?;
            Ok(parse_stored_content(raw.as_deref())?)
        }

        async fn save_content(
            &self,
            owner_id: i32,
            page_id: i32,
            content: SerializedContent,
        ) -> Result<()> {
            *self.saves.lock().unwrap() += 1;
            self.pages
                .lock()
                .unwrap()
                .insert((owner_id, page_id), Some(content.into_inner()));
            Ok(())
        }

        async fn check_slug_available(&self, _slug: &str) -> Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_invalid_content_never_reaches_gateway() {
        let gateway = MemoryGateway::default();
        gateway.pages.lock().unwrap().insert((1, 10), None);

        let mut session = EditorSession::new();
        session.load(gateway.load_content(1, 10).await.unwrap()).unwrap();
        session.add_block(BlockKind::Link).unwrap();

        let err = submit_and_save(&gateway, 1, 10, &mut session)
            .await
            .unwrap_err();
        assert!(matches!(err, LinkyError::ContentInvalid(_)));
        assert_eq!(*gateway.saves.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_valid_content_roundtrips_through_gateway() {
        let gateway = MemoryGateway::default();
        gateway.pages.lock().unwrap().insert((1, 10), None);

        let mut session = EditorSession::new();
        session.load(None).unwrap();
        let i = session.add_block(BlockKind::Link).unwrap();
        session.on_field_change(i, BlockField::Title, "Site").unwrap();
        session
            .on_field_change(i, BlockField::Url, "https://x.co")
            .unwrap();
        submit_and_save(&gateway, 1, 10, &mut session).await.unwrap();

        let stored = gateway.load_content(1, 10).await.unwrap().unwrap();
        let blocks: Vec<ContentBlock> = stored.into_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].url(), Some("https://x.co"));
    }
}
