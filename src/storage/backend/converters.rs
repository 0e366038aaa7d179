use crate::content::parse_stored_content;
use crate::errors::{LinkyError, Result};
use crate::storage::models::{Link, LinkDraft, Page, PageDraft, Session, User};
use migration::entities::{link, page, session, user};

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password,
        fullname: model.fullname,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_session(model: session::Model) -> Session {
    Session {
        id: model.id,
        token: model.session_token,
        data: model.session_data,
        user_id: model.user_id,
        expires_at: model.expires_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        title: model.title,
        slug: model.slug,
        link: model.link,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 页面内容列是 JSON 文本，解析失败说明数据已损坏
pub fn model_to_page(model: page::Model) -> Result<Page> {
    let content = parse_stored_content(model.content.as_deref()).map_err(|e| {
        LinkyError::serialization(format!("页面 {} 的内容无法解析: {}", model.id, e))
    })?;

    Ok(Page {
        id: model.id,
        title: model.title,
        slug: model.slug,
        description: model.description,
        content,
        published: model.published,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// 将 LinkDraft 转换为 ActiveModel（新建时带上归属和创建时间）
pub fn link_draft_to_active_model(
    draft: &LinkDraft,
    owner_id: Option<i32>,
    now: chrono::DateTime<chrono::Utc>,
) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: NotSet,
        title: Set(draft.title.clone()),
        slug: Set(draft.slug.clone()),
        link: Set(draft.link.clone()),
        user_id: owner_id.map_or(NotSet, Set),
        created_at: if owner_id.is_some() { Set(now) } else { NotSet },
        updated_at: Set(now),
    }
}

pub fn page_draft_to_active_model(
    draft: &PageDraft,
    owner_id: Option<i32>,
    now: chrono::DateTime<chrono::Utc>,
) -> page::ActiveModel {
    use sea_orm::ActiveValue::*;

    let creating = owner_id.is_some();
    let content = match &draft.content {
        Some(content) => Set(content.as_ref().map(|c| c.as_str().to_string())),
        None if creating => Set(None),
        None => NotSet,
    };
    let published = match draft.published {
        Some(published) => Set(published),
        None if creating => Set(false),
        None => NotSet,
    };

    page::ActiveModel {
        id: NotSet,
        title: Set(draft.title.clone()),
        slug: Set(draft.slug.clone()),
        description: Set(draft.description.clone()),
        content,
        published,
        user_id: owner_id.map_or(NotSet, Set),
        created_at: if owner_id.is_some() { Set(now) } else { NotSet },
        updated_at: Set(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    fn page_model(content: Option<&str>) -> page::Model {
        page::Model {
            id: 3,
            title: "Bio".to_string(),
            slug: "me".to_string(),
            description: String::new(),
            content: content.map(str::to_string),
            published: true,
            user_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_page_parses_content() {
        let page = model_to_page(page_model(Some(
            r#"[{"kind":"link","id":"x","title":"Blog","url":"https://b.example"}]"#,
        )))
        .unwrap();
        let content = page.content.unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content.get(0).unwrap().block.id(), "x");
    }

    #[test]
    fn test_model_to_page_null_content() {
        assert!(model_to_page(page_model(None)).unwrap().content.is_none());
    }

    #[test]
    fn test_model_to_page_corrupt_content() {
        assert!(matches!(
            model_to_page(page_model(Some("[{"))),
            Err(LinkyError::Serialization(_))
        ));
    }

    #[test]
    fn test_link_draft_active_model_new_vs_update() {
        let draft = LinkDraft {
            title: "Docs".to_string(),
            slug: "docs".to_string(),
            link: "https://docs.example".to_string(),
        };
        let now = Utc::now();

        let created = link_draft_to_active_model(&draft, Some(9), now);
        assert!(matches!(created.user_id, ActiveValue::Set(9)));
        assert!(matches!(created.created_at, ActiveValue::Set(_)));

        let updated = link_draft_to_active_model(&draft, None, now);
        assert!(matches!(updated.user_id, ActiveValue::NotSet));
        assert!(matches!(updated.created_at, ActiveValue::NotSet));
        if let ActiveValue::Set(slug) = updated.slug {
            assert_eq!(slug, "docs");
        } else {
            panic!("slug should be set");
        }
    }

    #[test]
    fn test_page_draft_update_keeps_omitted_fields() {
        let draft = PageDraft {
            title: "Bio".to_string(),
            slug: "me".to_string(),
            description: String::new(),
            content: None,
            published: None,
        };
        let now = Utc::now();

        let created = page_draft_to_active_model(&draft, Some(1), now);
        assert!(matches!(created.content, ActiveValue::Set(None)));
        assert!(matches!(created.published, ActiveValue::Set(false)));

        let updated = page_draft_to_active_model(&draft, None, now);
        assert!(matches!(updated.content, ActiveValue::NotSet));
        assert!(matches!(updated.published, ActiveValue::NotSet));

        let published = PageDraft {
            published: Some(true),
            content: Some(None),
            ..draft
        };
        let updated = page_draft_to_active_model(&published, None, now);
        assert!(matches!(updated.content, ActiveValue::Set(None)));
        assert!(matches!(updated.published, ActiveValue::Set(true)));
    }
}
