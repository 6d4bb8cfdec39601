use std::{fmt, panic::Location, sync::Arc};

use crate::{ErrorExt, StatusCode};

/// Ошибка с цепочкой контекстов: что делал логгер, когда она произошла.
///
/// Корневая ошибка хранится в `Arc`, поэтому клонирование дешёвое.
#[derive(Clone)]
pub struct StackError {
    inner: Arc<dyn ErrorExt>,
    origin: &'static Location<'static>,
    contexts: Vec<ErrorContext>,
}

/// Одна ступень контекста.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub message: String,
    pub location: &'static Location<'static>,
}

impl StackError {
    #[track_caller]
    pub fn new<E: ErrorExt>(err: E) -> Self {
        Self {
            inner: Arc::new(err),
            origin: Location::caller(),
            contexts: Vec::new(),
        }
    }

    /// Добавляет контекст (внешний добавляется последним).
    #[track_caller]
    pub fn context(
        mut self,
        message: impl Into<String>,
    ) -> Self {
        self.contexts.push(ErrorContext {
            message: message.into(),
            location: Location::caller(),
        });
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.inner.status_code()
    }

    pub fn contexts(&self) -> &[ErrorContext] {
        &self.contexts
    }

    /// Где ошибка была обёрнута в `StackError`.
    pub fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    pub fn downcast_ref<T: ErrorExt>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for StackError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let contexts: Vec<String> = self
            .contexts
            .iter()
            .map(|c| format!("{} ({}:{})", c.message, c.location.file(), c.location.line()))
            .collect();

        f.debug_struct("StackError")
            .field("error", &self.inner.to_string())
            .field("status_code", &self.status_code())
            .field("origin", &format_args!("{}:{}", self.origin.file(), self.origin.line()))
            .field("contexts", &contexts)
            .finish()
    }
}

impl fmt::Display for StackError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for ctx in self.contexts.iter().rev() {
            write!(f, "{} → ", ctx.message)?;
        }
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for StackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl<E: ErrorExt> From<E> for StackError {
    #[track_caller]
    fn from(e: E) -> Self {
        StackError::new(e)
    }
}
