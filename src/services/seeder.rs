//! Demo data seeding
//!
//! 创建管理员账号以及几条示例短链接和一个已发布的示例页面。
//! 已存在的数据不会被覆盖，可以重复执行。

use std::sync::Arc;

use tracing::info;

use super::auth_service::{ADMIN_USERNAME, CurrentUser};
use super::link_service::{LinkRequest, LinkService};
use super::page_service::{PageRequest, PageService};
use super::user_service::{CreateUserRequest, UserService};
use crate::content::{ContentBlock, ContentList};
use crate::errors::{LinkyError, Result};
use crate::storage::SeaOrmStorage;

pub const DEFAULT_ADMIN_PASSWORD: &str = "changeme123";

#[derive(Debug, Default, Clone)]
pub struct SeedReport {
    pub admin_created: bool,
    pub links_created: usize,
    pub pages_created: usize,
}

const SAMPLE_LINKS: &[(&str, &str, &str)] = &[
    ("Rust", "rust", "https://www.rust-lang.org"),
    ("GitHub", "gh", "https://github.com"),
    ("Docs", "docs", "https://docs.rs"),
];

fn sample_page_content() -> ContentList {
    ContentList::from_blocks(vec![
        ContentBlock::title_block("Welcome to our site!"),
        ContentBlock::link_block("Google", "https://google.com"),
        ContentBlock::link_block("YouTube", "https://youtube.com"),
        ContentBlock::title_block("Explore our resources!"),
        ContentBlock::link_block("GitHub", "https://github.com"),
    ])
}

pub async fn seed(storage: Arc<SeaOrmStorage>, admin_password: &str) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let admin = match storage.find_user_by_username(ADMIN_USERNAME).await? {
        Some(user) => user,
        None => {
            let user = UserService::new(storage.clone())
                .create_user_unchecked(
                    CreateUserRequest {
                        username: ADMIN_USERNAME.to_string(),
                        fullname: "Admin".to_string(),
                        password: admin_password.to_string(),
                    },
                    false,
                )
                .await?;
            report.admin_created = true;
            user
        }
    };
    let owner = CurrentUser::from(&admin);

    let links = LinkService::new(storage.clone());
    for (title, slug, url) in SAMPLE_LINKS {
        let req = LinkRequest {
            title: title.to_string(),
            slug: slug.to_string(),
            link: url.to_string(),
        };
        match links.create_link(&owner, req).await {
            Ok(_) => report.links_created += 1,
            Err(LinkyError::SlugTaken(_)) => {}
            Err(e) => return Err(e),
        }
    }

    let pages = PageService::new(storage.clone());
    let req = PageRequest {
        title: "Page 1".to_string(),
        slug: "page-1".to_string(),
        description: None,
        content: Some(Some(sample_page_content())),
        published: Some(true),
    };
    match pages.create_page(&owner, req).await {
        Ok(_) => report.pages_created += 1,
        Err(LinkyError::SlugTaken(_)) => {}
        Err(e) => return Err(e),
    }

    info!(
        "Seed finished: admin_created={}, links={}, pages={}",
        report.admin_created, report.links_created, report.pages_created
    );
    Ok(report)
}
