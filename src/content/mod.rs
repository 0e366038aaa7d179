//! 页面内容模型
//!
//! 页面由一组有序的内容块组成（标题块 / 链接块）。这里提供：
//! - 内容块与列表的结构操作（插入、删除、移动、字段更新）
//! - 字段校验与整表校验
//! - 编辑会话状态机以及 slug 可用性检查的时序控制
//! - JSON 序列化格式
//! - 持久化网关接口
//!
//! 本模块不做任何 IO，持久化由 [`ContentGateway`] 的实现负责。

mod block;
mod codec;
mod error;
mod gateway;
mod list;
mod session;
mod slug_check;
mod validator;

pub use block::{BlockErrors, BlockField, BlockKind, ContentBlock};
pub use codec::{SerializedContent, deserialize_content, parse_stored_content, serialize_content};
pub use error::{ContentError, FieldViolation, ListValidationError};
pub use gateway::{ContentGateway, submit_and_save};
pub use list::{BlockEntry, ContentList};
pub use session::{EditorSession, SessionState};
pub use slug_check::{SlugAvailability, SlugCheck, SlugStatus};
pub use validator::{INVALID_URL, TITLE_REQUIRED, validate_block, validate_field, validate_list};
