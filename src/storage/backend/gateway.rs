use async_trait::async_trait;

use super::SeaOrmStorage;
use crate::content::{ContentGateway, ContentList, SerializedContent};
use crate::errors::{LinkyError, Result};

#[async_trait]
impl ContentGateway for SeaOrmStorage {
    async fn load_content(&self, owner_id: i32, page_id: i32) -> Result<Option<ContentList>> {
        let page = self
            .find_page(owner_id, page_id)
            .await?
            .ok_or_else(|| LinkyError::page_not_found(format!("页面不存在: {}", page_id)))?;
        Ok(page.content)
    }

    async fn save_content(
        &self,
        owner_id: i32,
        page_id: i32,
        content: SerializedContent,
    ) -> Result<()> {
        self.save_page_content(owner_id, page_id, &content).await
    }

    async fn check_slug_available(&self, slug: &str) -> Result<bool> {
        Ok(!self.page_slug_exists(slug, None).await?)
    }
}
