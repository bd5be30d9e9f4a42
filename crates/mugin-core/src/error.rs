use crate::model::Flow;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: `{field}` is missing or empty")]
    InvalidInput { field: &'static str },

    #[error("duplicate link: {from} -> {to} ({flow}) already exists")]
    DuplicateEntity { from: String, to: String, flow: Flow },

    #[error("too many parallel links between {from} and {to} (max {max})")]
    CapacityExceeded { from: String, to: String, max: u32 },

    #[error("a node named {name:?} already exists")]
    DuplicateNode { name: String },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("graph JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("delimited record error: {0}")]
    Delimited(#[from] csv::Error),
}

impl Error {
    /// True for rejections that describe a logical conflict with entities already in the graph
    /// (an exact duplicate, or one parallel link too many).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::DuplicateEntity { .. }
                | Error::CapacityExceeded { .. }
                | Error::DuplicateNode { .. }
        )
    }

    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound { what: what.into() }
    }
}
