//! 短链接 / 页面 slug 与用户名的字符规则

/// 与公开路由冲突、不能作为短链接 slug 的保留词
pub const RESERVED_SLUGS: &[&str] = &[
    "login",
    "logout",
    "dashboard",
    "p",
    "api",
    "check-slug",
    "check-page-slug",
    "check-username",
    "seeder",
    "health",
];

/// slug 和用户名允许的字符：字母、数字、`@`、`_`、`-`
pub fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '_' | '-'))
}

pub fn is_reserved(slug: &str) -> bool {
    RESERVED_SLUGS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(slug))
}

/// 短链接 slug 校验：字符合法且不是保留词
pub fn validate_link_slug(slug: &str) -> Result<(), String> {
    if !is_valid_identifier(slug) {
        return Err("Slug may only contain letters, numbers, @, _ and -".to_string());
    }
    if is_reserved(slug) {
        return Err(format!("Slug '{}' is reserved", slug));
    }
    Ok(())
}

/// 页面 slug 校验：页面挂在 `/p/` 下，不受保留词限制
pub fn validate_page_slug(slug: &str) -> Result<(), String> {
    if !is_valid_identifier(slug) {
        return Err("Slug may only contain letters, numbers, @, _ and -".to_string());
    }
    Ok(())
}
