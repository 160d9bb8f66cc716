use serde::Serialize;

/// Status of one asynchronous action, consumed by the templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum AsyncState<T> {
    #[default]
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> AsyncState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncState::Pending)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, AsyncState::Succeeded(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AsyncState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
