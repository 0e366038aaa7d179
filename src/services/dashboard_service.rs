use std::sync::Arc;

use serde::Serialize;

use super::auth_service::CurrentUser;
use crate::errors::Result;
use crate::storage::{Link, Page, SeaOrmStorage};

/// 首页展示的最近条目数
pub const RECENT_LIMIT: u64 = 3;

/// 全站统计，仅管理员可见
#[derive(Debug, Clone, Serialize)]
pub struct GlobalTotals {
    pub users: u64,
    pub links: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_links: u64,
    pub total_pages: u64,
    pub recent_links: Vec<Link>,
    pub recent_pages: Vec<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalTotals>,
}

pub struct DashboardService {
    storage: Arc<SeaOrmStorage>,
}

impl DashboardService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn summary(&self, user: &CurrentUser) -> Result<DashboardSummary> {
        let total_links = self.storage.count_links(Some(user.id)).await?;
        let total_pages = self.storage.count_pages(Some(user.id)).await?;
        let recent_links = self.storage.list_links(user.id, Some(RECENT_LIMIT)).await?;
        let recent_pages = self.storage.list_pages(user.id, Some(RECENT_LIMIT)).await?;

        let global = if user.is_admin() {
            Some(GlobalTotals {
                users: self.storage.count_users().await?,
                links: self.storage.count_links(None).await?,
                pages: self.storage.count_pages(None).await?,
            })
        } else {
            None
        };

        Ok(DashboardSummary {
            total_links,
            total_pages,
            recent_links,
            recent_pages,
            global,
        })
    }
}
