//! Page management service
//!
//! 页面元数据（标题、slug、描述）在这里校验；页面内容统一交给
//! [`EditorSession`] 校验和序列化，任何一个块不合法都会带着完整的
//! 违规列表拒绝整个请求。

use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use tracing::info;

use super::auth_service::CurrentUser;
use crate::content::{
    ContentGateway, ContentList, EditorSession, SerializedContent, submit_and_save,
};
use crate::errors::{LinkyError, Result};
use crate::storage::{Page, PageDraft, SeaOrmStorage};
use crate::utils::slug::validate_page_slug;

/// Request to create or update a page
///
/// 更新时缺省的字段保持原值：没有 `content` 键则不动已存内容，
/// `"content": null` 才会清空；没有 `published` 键则不改发布状态。
/// 新建时两者缺省分别为无内容和未发布。
#[derive(Debug, Clone, Deserialize)]
pub struct PageRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 外层 `None` 表示请求里没有该键
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<ContentList>>,
    #[serde(default)]
    pub published: Option<bool>,
}

/// 键存在时（包括显式 null）包一层 `Some`
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// 让内容走一遍编辑会话：载入、整表校验、序列化
fn finalize_content(content: Option<ContentList>) -> Result<Option<SerializedContent>> {
    let Some(content) = content else {
        return Ok(None);
    };
    let mut session = EditorSession::new();
    session.load(Some(content))?;
    Ok(Some(session.submit()?))
}

impl PageRequest {
    fn into_draft(self) -> Result<PageDraft> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(LinkyError::validation("Title must not be empty"));
        }

        let slug = self.slug.trim().to_string();
        validate_page_slug(&slug).map_err(LinkyError::invalid_slug)?;

        Ok(PageDraft {
            title,
            slug,
            description: self.description.unwrap_or_default(),
            content: self.content.map(finalize_content).transpose()?,
            published: self.published,
        })
    }
}

pub struct PageService {
    storage: Arc<SeaOrmStorage>,
}

impl PageService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    fn gateway(&self) -> &dyn ContentGateway {
        self.storage.as_ref()
    }

    pub async fn list_pages(&self, owner: &CurrentUser) -> Result<Vec<Page>> {
        self.storage.list_pages(owner.id, None).await
    }

    pub async fn get_page(&self, owner: &CurrentUser, id: i32) -> Result<Page> {
        self.storage
            .find_page(owner.id, id)
            .await?
            .ok_or_else(|| LinkyError::page_not_found(format!("Page {} not found", id)))
    }

    pub async fn create_page(&self, owner: &CurrentUser, req: PageRequest) -> Result<Page> {
        let draft = req.into_draft()?;

        if !self.gateway().check_slug_available(&draft.slug).await? {
            return Err(LinkyError::slug_taken(format!(
                "Page slug '{}' is already taken",
                draft.slug
            )));
        }

        let page = self.storage.insert_page(owner.id, &draft).await?;
        info!("PageService: {} created page '{}'", owner.username, page.slug);
        Ok(page)
    }

    pub async fn update_page(
        &self,
        owner: &CurrentUser,
        id: i32,
        req: PageRequest,
    ) -> Result<Page> {
        let draft = req.into_draft()?;

        if self.storage.page_slug_exists(&draft.slug, Some(id)).await? {
            return Err(LinkyError::slug_taken(format!(
                "Page slug '{}' is already taken",
                draft.slug
            )));
        }

        self.storage.update_page(owner.id, id, &draft).await
    }

    /// 只替换页面内容
    ///
    /// 先通过网关确认页面存在且属于当前用户，再用编辑会话校验新内容后写回。
    pub async fn replace_content(
        &self,
        owner: &CurrentUser,
        id: i32,
        content: ContentList,
    ) -> Result<Page> {
        let gateway = self.gateway();
        let mut session = EditorSession::new();
        // 确认归属
        gateway.load_content(owner.id, id).await?;
        session.load(Some(content))?;
        submit_and_save(gateway, owner.id, id, &mut session).await?;
        self.get_page(owner, id).await
    }

    pub async fn set_published(
        &self,
        owner: &CurrentUser,
        id: i32,
        published: bool,
    ) -> Result<Page> {
        self.storage.set_page_published(owner.id, id, published).await
    }

    pub async fn delete_page(&self, owner: &CurrentUser, id: i32) -> Result<()> {
        self.storage.delete_page(owner.id, id).await
    }

    pub async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool> {
        match exclude_id {
            Some(id) => self.storage.page_slug_exists(slug.trim(), Some(id)).await,
            None => Ok(!self.gateway().check_slug_available(slug.trim()).await?),
        }
    }

    /// 公开访问：未发布的页面视为不存在
    pub async fn public_page(&self, slug: &str) -> Result<Page> {
        self.storage
            .find_published_page(slug)
            .await?
            .ok_or_else(|| LinkyError::page_not_found(format!("Page '{}' not found", slug)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBlock;

    #[test]
    fn test_invalid_content_rejects_with_all_violations() {
        let req = PageRequest {
            title: "Bio".to_string(),
            slug: "bio".to_string(),
            description: None,
            content: Some(Some(ContentList::from_blocks(vec![
                ContentBlock::title_block(""),
                ContentBlock::link_block("x", "not a url"),
            ]))),
            published: None,
        };
        match req.into_draft() {
            Err(LinkyError::ContentInvalid(v)) => assert_eq!(v.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_missing_content_stays_null() {
        let draft = PageRequest {
            title: "Bio".to_string(),
            slug: "bio".to_string(),
            description: Some("hello".to_string()),
            content: Some(None),
            published: Some(true),
        }
        .into_draft()
        .unwrap();
        assert!(matches!(draft.content, Some(None)));
        assert_eq!(draft.published, Some(true));
        assert_eq!(draft.description, "hello");
    }

    #[test]
    fn test_absent_content_key_differs_from_null() {
        let absent: PageRequest =
            serde_json::from_str(r#"{"title":"Bio","slug":"bio"}"#).unwrap();
        assert!(absent.content.is_none());
        assert!(absent.published.is_none());

        let null: PageRequest =
            serde_json::from_str(r#"{"title":"Bio","slug":"bio","content":null}"#).unwrap();
        assert!(matches!(null.content, Some(None)));

        let draft = absent.into_draft().unwrap();
        assert!(draft.content.is_none());
    }
}
