use std::{fmt, str::FromStr, sync::Arc};

use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::layer::{Context, Layer};

use crate::logging::{
    category::Category,
    location::{SourceLocation, UNKNOWN_FILE, UNKNOWN_FUNCTION},
    logger::{LogOptions, Logger},
};

/// Поле события, задающее категорию явно: `info!(category = "network", ...)`.
pub const CATEGORY_FIELD: &str = "category";
/// Поле события, задающее scope для multi-file режима.
pub const SCOPE_FIELD: &str = "scope";

const MESSAGE_FIELD: &str = "message";
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Слой `tracing_subscriber`, пересылающий события в [`Logger`].
///
/// Уровень переводится в категорию (`ERROR` → error, `WARN` → warning,
/// `INFO` → general, `DEBUG`/`TRACE` → debug), если у события нет поля
/// `category`. События самого `glyphlog` пропускаются, иначе предупреждение
/// о сбое записи вызывало бы новую запись.
pub struct CategoryLayer {
    target: LayerTarget,
}

enum LayerTarget {
    Global,
    Owned(Arc<Logger>),
}

/// Собирает текст события: `message`, затем остальные поля как `k=v`.
#[derive(Debug, Default)]
struct EventVisitor {
    message: String,
    fields: Vec<String>,
    category: Option<Category>,
    scope: Option<String>,
}

impl CategoryLayer {
    /// Пишет в [`crate::logging::global`].
    pub fn global() -> Self {
        Self {
            target: LayerTarget::Global,
        }
    }

    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            target: LayerTarget::Owned(logger),
        }
    }

    fn logger(&self) -> &Logger {
        match &self.target {
            LayerTarget::Global => crate::logging::global(),
            LayerTarget::Owned(logger) => logger,
        }
    }
}

/// Категория по уровню `tracing`.
pub fn category_for_level(level: &Level) -> Category {
    match *level {
        Level::ERROR => Category::Error,
        Level::WARN => Category::Warning,
        Level::INFO => Category::General,
        _ => Category::Debug,
    }
}

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

impl EventVisitor {
    fn text(&self) -> String {
        let mut parts = Vec::with_capacity(self.fields.len() + 1);
        if !self.message.is_empty() {
            parts.push(self.message.as_str());
        }
        parts.extend(self.fields.iter().map(String::as_str));
        parts.join(" ")
    }
}

impl Visit for EventVisitor {
    fn record_str(
        &mut self,
        field: &Field,
        value: &str,
    ) {
        match field.name() {
            MESSAGE_FIELD => self.message = value.to_string(),
            CATEGORY_FIELD => self.category = Category::from_str(value).ok(),
            SCOPE_FIELD => self.scope = Some(value.to_string()),
            name => self.fields.push(format!("{name}={value}")),
        }
    }

    fn record_debug(
        &mut self,
        field: &Field,
        value: &dyn fmt::Debug,
    ) {
        match field.name() {
            MESSAGE_FIELD => self.message = format!("{value:?}"),
            CATEGORY_FIELD | SCOPE_FIELD => self.record_str(field, &format!("{value:?}")),
            name => self.fields.push(format!("{name}={value:?}")),
        }
    }
}

impl<S> Layer<S> for CategoryLayer
where
    S: Subscriber,
{
    fn on_event(
        &self,
        event: &Event<'_>,
        _ctx: Context<'_, S>,
    ) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let category = visitor
            .category
            .unwrap_or_else(|| category_for_level(metadata.level()));

        let function = metadata
            .module_path()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or(UNKNOWN_FUNCTION);
        let location = SourceLocation::new(
            metadata.file().unwrap_or(UNKNOWN_FILE),
            function,
            metadata.line().unwrap_or(0),
        );
        let options = LogOptions {
            write_to_file: true,
            scope: visitor.scope.as_deref(),
        };

        let text = visitor.text();
        self.logger()
            .log_message(category, Some(text.as_str()), location, &options);
    }
}
