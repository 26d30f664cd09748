//! Notices
//!
//! Non-blocking messages (toasts) for failures the user should hear about
//! without the list being taken down.

use std::future::Future;

use crate::error::GatewayResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub message: String,
}

/// Ordered queue of visible notices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u32,
}

impl NoticeBoard {
    /// Upper bound on visible notices; the oldest is dropped first.
    pub const CAPACITY: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice {
            id,
            message: message.into(),
        });
        if self.notices.len() > Self::CAPACITY {
            self.notices.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: u32) {
        self.notices.retain(|n| n.id != id);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

/// Await a gateway call; on failure hand `"<action>: <error>"` to `notify`.
///
/// The list never learns about mutations through their result, so the value
/// is only returned for callers that want to log it.
pub async fn notify_on_failure<T>(
    action: &str,
    call: impl Future<Output = GatewayResult<T>>,
    notify: impl FnOnce(String),
) -> Option<T> {
    match call.await {
        Ok(value) => Some(value),
        Err(err) => {
            notify(format!("{action}: {err}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_removes_only_that_notice() {
        let mut board = NoticeBoard::new();
        let first = board.push("add failed");
        let second = board.push("delete failed");
        board.dismiss(first);

        assert_eq!(board.notices().len(), 1);
        assert_eq!(board.notices()[0].id, second);
    }

    #[test]
    fn oldest_notice_falls_off() {
        let mut board = NoticeBoard::new();
        for i in 0..=NoticeBoard::CAPACITY {
            board.push(format!("failure {i}"));
        }
        assert_eq!(board.notices().len(), NoticeBoard::CAPACITY);
        assert_eq!(board.notices()[0].message, "failure 1");
    }
}
