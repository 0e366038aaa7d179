//! slug 可用性检查的时序控制
//!
//! 每次检查发出一张带序号的票据，响应回来时只有满足以下条件才会生效：
//! 票据的 slug 等于当前 slug，且序号不早于当前 slug 的设定时刻、
//! 也不早于上一次生效的响应。乱序到达的旧响应因此被丢弃。

use serde::Serialize;

/// 一次可用性检查请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCheck {
    pub slug: String,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugStatus {
    /// 还没有检查过
    Idle,
    Pending,
    Available,
    Taken,
    /// 检查请求失败，可用性未知
    Unknown,
}

#[derive(Debug, Clone)]
pub struct SlugAvailability {
    current: Option<String>,
    current_since: u64,
    next_seq: u64,
    last_applied: Option<u64>,
    status: SlugStatus,
}

impl Default for SlugAvailability {
    fn default() -> Self {
        Self {
            current: None,
            current_since: 0,
            next_seq: 0,
            last_applied: None,
            status: SlugStatus::Idle,
        }
    }
}

impl SlugAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn status(&self) -> SlugStatus {
        self.status
    }

    /// 设置新的 slug 并发出检查票据
    pub fn request(&mut self, slug: impl Into<String>) -> SlugCheck {
        let slug = slug.into();
        self.next_seq += 1;
        let seq = self.next_seq;

        if self.current.as_deref() != Some(slug.as_str()) {
            self.current = Some(slug.clone());
            self.current_since = seq;
        }
        self.status = SlugStatus::Pending;

        SlugCheck { slug, seq }
    }

    /// 应用检查结果，`Ok(true)` 表示可用
    ///
    /// 返回值表示该响应是否被采纳。
    pub fn apply<E>(&mut self, ticket: &SlugCheck, outcome: Result<bool, E>) -> bool {
        if self.current.as_deref() != Some(ticket.slug.as_str()) {
            return false;
        }
        if ticket.seq < self.current_since {
            return false;
        }
        if self.last_applied.is_some_and(|last| ticket.seq <= last) {
            return false;
        }

        self.last_applied = Some(ticket.seq);
        self.status = match outcome {
            Ok(true) => SlugStatus::Available,
            Ok(false) => SlugStatus::Taken,
            Err(_) => SlugStatus::Unknown,
        };
        true
    }
}
