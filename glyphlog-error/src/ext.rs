use std::{any::Any, error::Error};

use crate::StatusCode;

/// Общий интерфейс ошибок, которые можно положить в [`StackError`](crate::StackError).
pub trait ErrorExt: Error + Send + Sync + 'static {
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    /// Для downcast к конкретному типу.
    fn as_any(&self) -> &dyn Any;
}
