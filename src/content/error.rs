use std::fmt;

use serde::Serialize;

use super::block::BlockField;

/// 单个字段的校验失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub index: usize,
    pub field: BlockField,
    pub message: String,
}

/// 整表校验结果：包含所有违规项，而不只是第一个
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ListValidationError {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ListValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} content violation(s)", self.violations.len())?;
        for v in &self.violations {
            write!(f, "; block {} {}: {}", v.index, v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ListValidationError {}

/// 内容操作错误
///
/// 下标越界和字段不适用属于调用方错误，但下标来自 HTTP 请求体，
/// 所以以错误值返回而不是 panic。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    IndexOutOfRange { index: usize, len: usize },
    FieldNotApplicable { index: usize, field: BlockField },
    SessionClosed,
    Validation(ListValidationError),
    Serialization(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Block index {} out of range (len {})", index, len)
            }
            Self::FieldNotApplicable { index, field } => {
                write!(f, "Field '{}' does not apply to block {}", field, index)
            }
            Self::SessionClosed => write!(f, "Editor session already submitted"),
            Self::Validation(err) => write!(f, "{}", err),
            Self::Serialization(msg) => write!(f, "Content serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for ContentError {}
