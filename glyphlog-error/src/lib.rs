//! Ошибки glyphlog: коды статуса, стек контекстов и ошибки файловых целей.

mod ext;
mod stack;
mod status_code;
mod writer;

pub use ext::ErrorExt;
pub use stack::{ErrorContext, StackError};
pub use status_code::StatusCode;
pub use writer::{WriterError, WriterResult};

pub type GlyphResult<T> = Result<T, StackError>;
