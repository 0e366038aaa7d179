//! Link management service
//!
//! 短链接的增删改查，全部按所属用户隔离。公开跳转只按 slug 查询。

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::auth_service::CurrentUser;
use crate::errors::{LinkyError, Result};
use crate::storage::{Link, LinkDraft, SeaOrmStorage};
use crate::utils::slug::{is_reserved, validate_link_slug};
use crate::utils::url_validator::{validate_url, validation_error_message};

/// Request to create or update a link
#[derive(Debug, Clone, Deserialize)]
pub struct LinkRequest {
    pub title: String,
    pub slug: String,
    /// Destination URL, must be http(s)
    pub link: String,
}

impl LinkRequest {
    fn into_draft(self) -> Result<LinkDraft> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(LinkyError::validation("Title must not be empty"));
        }

        let slug = self.slug.trim().to_string();
        validate_link_slug(&slug).map_err(LinkyError::invalid_slug)?;

        let link = self.link.trim().to_string();
        validate_url(&link).map_err(|e| LinkyError::invalid_url(validation_error_message(&e)))?;

        Ok(LinkDraft { title, slug, link })
    }
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_links(&self, owner: &CurrentUser) -> Result<Vec<Link>> {
        self.storage.list_links(owner.id, None).await
    }

    pub async fn get_link(&self, owner: &CurrentUser, id: i32) -> Result<Link> {
        self.storage
            .find_link(owner.id, id)
            .await?
            .ok_or_else(|| LinkyError::link_not_found(format!("Link {} not found", id)))
    }

    pub async fn create_link(&self, owner: &CurrentUser, req: LinkRequest) -> Result<Link> {
        let draft = req.into_draft()?;

        if self.storage.link_slug_exists(&draft.slug, None).await? {
            return Err(LinkyError::slug_taken(format!(
                "Slug '{}' is already taken",
                draft.slug
            )));
        }

        let link = self.storage.insert_link(owner.id, &draft).await?;
        info!(
            "LinkService: {} created link '{}' -> '{}'",
            owner.username, link.slug, link.link
        );
        Ok(link)
    }

    pub async fn update_link(
        &self,
        owner: &CurrentUser,
        id: i32,
        req: LinkRequest,
    ) -> Result<Link> {
        let draft = req.into_draft()?;

        if self.storage.link_slug_exists(&draft.slug, Some(id)).await? {
            return Err(LinkyError::slug_taken(format!(
                "Slug '{}' is already taken",
                draft.slug
            )));
        }

        self.storage.update_link(owner.id, id, &draft).await
    }

    pub async fn delete_link(&self, owner: &CurrentUser, id: i32) -> Result<()> {
        self.storage.delete_link(owner.id, id).await
    }

    /// slug 是否不可用：保留词或已被占用都算已存在
    pub async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool> {
        let slug = slug.trim();
        if is_reserved(slug) {
            return Ok(true);
        }
        self.storage.link_slug_exists(slug, exclude_id).await
    }

    /// 公开跳转：slug -> 目标地址
    pub async fn resolve(&self, slug: &str) -> Result<Link> {
        self.storage
            .find_link_by_slug(slug)
            .await?
            .ok_or_else(|| LinkyError::link_not_found(format!("Short link '{}' not found", slug)))
    }
}
