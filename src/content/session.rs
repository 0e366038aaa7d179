//! 页面内容编辑会话
//!
//! 状态流转：
//!
//! ```text
//! Empty ──load──▶ Hydrated ──edit──▶ Editing ──submit(失败)──▶ ValidationFailed
//!                                     ▲   │                         │
//!                                     │   └──submit(成功)──▶ Submitted
//!                                     └──────────edit───────────────┘
//! ```
//!
//! `Submitted` 是终态，之后的任何操作都返回 [`ContentError::SessionClosed`]。
//! 会话只负责内容本身，提交时不会调用持久化网关。

use serde::Serialize;
use tracing::debug;

use super::block::{BlockField, BlockKind, ContentBlock};
use super::codec::{SerializedContent, serialize_content};
use super::error::ContentError;
use super::list::ContentList;
use super::slug_check::{SlugAvailability, SlugCheck, SlugStatus};
use super::validator::{validate_field, validate_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    Hydrated,
    Editing,
    ValidationFailed,
    Submitted,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    state: SessionState,
    content: ContentList,
    slug: SlugAvailability,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Empty,
            content: ContentList::new(),
            slug: SlugAvailability::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn content(&self) -> &ContentList {
        &self.content
    }

    fn ensure_open(&self) -> Result<(), ContentError> {
        if self.state == SessionState::Submitted {
            return Err(ContentError::SessionClosed);
        }
        Ok(())
    }

    fn mark_editing(&mut self) {
        self.state = SessionState::Editing;
    }

    /// 载入已有内容；`None` 表示新页面，从空列表开始
    pub fn load(&mut self, existing: Option<ContentList>) -> Result<(), ContentError> {
        self.ensure_open()?;
        let mut content = existing.unwrap_or_default();
        content.clear_errors();
        self.content = content;
        self.state = SessionState::Hydrated;
        debug!("Editor session hydrated with {} block(s)", self.content.len());
        Ok(())
    }

    /// 修改字段并立即校验该字段，返回该字段当前的错误信息
    pub fn on_field_change(
        &mut self,
        index: usize,
        field: BlockField,
        value: impl Into<String>,
    ) -> Result<Option<String>, ContentError> {
        self.ensure_open()?;
        let value = value.into();
        self.content.update_field(index, field, value.as_str())?;

        let kind = self
            .content
            .get(index)
            .map(|entry| entry.block.kind())
            .ok_or(ContentError::IndexOutOfRange {
                index,
                len: self.content.len(),
            })?;
        let message = validate_field(kind, field, &value);
        self.content
            .errors_mut(index)?
            .set(field, message.clone());

        self.mark_editing();
        Ok(message)
    }

    pub fn add_block(&mut self, kind: BlockKind) -> Result<usize, ContentError> {
        self.ensure_open()?;
        let index = self.content.insert(kind);
        self.mark_editing();
        Ok(index)
    }

    pub fn delete_block(&mut self, index: usize) -> Result<ContentBlock, ContentError> {
        self.ensure_open()?;
        let removed = self.content.remove(index)?;
        self.mark_editing();
        Ok(removed)
    }

    /// 拖拽排序；`source == target` 时内容和状态都不变
    pub fn reorder(&mut self, source: usize, target: usize) -> Result<(), ContentError> {
        self.ensure_open()?;
        self.content.move_block(source, target)?;
        if source != target {
            self.mark_editing();
        }
        Ok(())
    }

    /// 整表校验，通过则返回序列化后的内容并关闭会话
    ///
    /// 失败时把所有错误写回各块的错误信息，会话进入 `ValidationFailed`，
    /// 仍可继续编辑。
    pub fn submit(&mut self) -> Result<SerializedContent, ContentError> {
        self.ensure_open()?;

        if let Err(err) = validate_list(&self.content) {
            self.content.clear_errors();
            for violation in &err.violations {
                self.content
                    .errors_mut(violation.index)?
                    .set(violation.field, Some(violation.message.clone()));
            }
            self.state = SessionState::ValidationFailed;
            debug!("Editor session submit rejected: {}", err);
            return Err(ContentError::Validation(err));
        }

        self.content.clear_errors();
        let serialized = serialize_content(&self.content)
            .map_err(|e| ContentError::Serialization(e.to_string()))?;
        self.state = SessionState::Submitted;
        Ok(serialized)
    }

    /// 页面 slug 改变时发出可用性检查票据
    pub fn check_slug(&mut self, slug: impl Into<String>) -> SlugCheck {
        self.slug.request(slug)
    }

    /// 应用 slug 检查结果，过期的响应会被忽略
    pub fn apply_slug_check<E>(&mut self, ticket: &SlugCheck, outcome: Result<bool, E>) -> bool {
        self.slug.apply(ticket, outcome)
    }

    pub fn slug_status(&self) -> SlugStatus {
        self.slug.status()
    }
}
