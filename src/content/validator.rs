//! 字段校验
//!
//! 规则：
//! - `title`：必填，长度至少为 1
//! - `url`（仅链接块）：必须是绝对 URL，且不能是可执行脚本的协议

use super::block::{BlockErrors, BlockField, BlockKind, ContentBlock};
use super::error::{FieldViolation, ListValidationError};
use super::list::ContentList;
use crate::utils::url_validator::validate_absolute_url;

pub const TITLE_REQUIRED: &str = "Title must not be empty";
pub const INVALID_URL: &str = "Invalid URL";

/// 校验单个字段，返回第一个错误信息
pub fn validate_field(kind: BlockKind, field: BlockField, value: &str) -> Option<String> {
    if !field.applies_to(kind) {
        return Some(format!("Field '{}' does not apply to {} blocks", field, kind));
    }

    match field {
        BlockField::Title if value.is_empty() => Some(TITLE_REQUIRED.to_string()),
        BlockField::Title => None,
        BlockField::Url => validate_absolute_url(value)
            .err()
            .map(|_| INVALID_URL.to_string()),
    }
}

/// 校验一个块的所有字段
pub fn validate_block(block: &ContentBlock) -> BlockErrors {
    let kind = block.kind();
    let mut errors = BlockErrors::new();
    for &field in BlockField::fields_of(kind) {
        let value = block.field(field).unwrap_or_default();
        errors.set(field, validate_field(kind, field, value));
    }
    errors
}

/// 校验整个列表，收集所有违规项
pub fn validate_list(list: &ContentList) -> Result<(), ListValidationError> {
    let violations: Vec<FieldViolation> = list
        .blocks()
        .enumerate()
        .flat_map(|(index, block)| {
            validate_block(block)
                .iter()
                .map(|(field, message)| FieldViolation {
                    index,
                    field,
                    message: message.to_string(),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ListValidationError { violations })
    }
}
