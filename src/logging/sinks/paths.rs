//! Файловые помощники, общие для single-file и multi-file целей.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use glyphlog_error::{WriterError, WriterResult};

/// Имя поддиректории, которую создаёт [`logs_directory_beside`].
pub const LOGS_DIRECTORY_NAME: &str = "logs";

/// Директория, содержащая `candidate`.
///
/// Отбрасывает последний сегмент пути; сам путь может не существовать.
/// Для голого имени файла возвращает `"."`.
pub fn directory_of(candidate: &str) -> WriterResult<PathBuf> {
    if candidate.trim().is_empty() {
        return Err(WriterError::invalid_path(candidate, "empty path"));
    }

    match Path::new(candidate).parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(WriterError::invalid_path(
            candidate,
            "path has no parent directory",
        )),
    }
}

/// `<directory_of(candidate)>/logs`: директория логов рядом с файлом,
/// обычно вызывается с `file!()`.
pub fn logs_directory_beside(candidate: &str) -> WriterResult<PathBuf> {
    directory_of(candidate).map(|dir| dir.join(LOGS_DIRECTORY_NAME))
}

/// Создаёт директорию (вместе с родителями), если её нет.
pub fn ensure_directory(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

/// Идемпотентно: `true`, если директория уже была или успешно создана.
pub fn create_directory_if_missing(path: &Path) -> bool {
    match ensure_directory(path) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "Failed to create logs directory"
            );
            false
        }
    }
}

/// Размер файла в байтах; 0, если файла нет.
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Удаляет файл. Отсутствующий файл ошибкой не считается.
pub fn remove_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// Дописывает `text` и перевод строки в конец файла, создавая файл при
/// необходимости.
pub fn append_line(
    path: &Path,
    text: &str,
) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut line = String::with_capacity(text.len() + 1);
    line.push_str(text);
    line.push('\n');

    file.write_all(line.as_bytes())?;
    file.flush()
}

/// Последний сегмент пути (`src/jobs/runner.rs` → `runner.rs`).
///
/// Разделителями считаются и `/`, и `\`, чтобы одинаково разбирать `file!()`
/// на любой платформе.
pub fn file_base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Имя файла без расширения (`src/jobs/runner.rs` → `runner`).
pub fn file_stem(path: &str) -> &str {
    let base = file_base_name(path);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(idx) => &base[..idx],
    }
}

/// Проверяет, что `name` можно использовать как имя файла внутри директории
/// логов.
pub fn validate_file_name(name: &str) -> WriterResult<()> {
    if name.trim().is_empty() {
        return Err(WriterError::invalid_path(name, "empty file name"));
    }
    if name.contains(['/', '\\']) {
        return Err(WriterError::invalid_path(
            name,
            "file name must not contain path separators",
        ));
    }
    if name == "." || name == ".." {
        return Err(WriterError::invalid_path(name, "reserved file name"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_directory_of_strips_last_segment() {
        assert_eq!(
            directory_of("/var/app/src/main.rs").unwrap(),
            PathBuf::from("/var/app/src")
        );
        assert_eq!(
            directory_of("/not/existing/yet.log").unwrap(),
            PathBuf::from("/not/existing")
        );
        assert_eq!(directory_of("main.rs").unwrap(), PathBuf::from("."));
    }

    #[test]
    fn test_directory_of_rejects_empty_and_root() {
        assert!(directory_of("").is_err());
        assert!(directory_of("   ").is_err());
        assert!(directory_of("/").is_err());
    }

    #[test]
    fn test_logs_directory_beside() {
        assert_eq!(
            logs_directory_beside("/srv/app/src/main.rs").unwrap(),
            PathBuf::from("/srv/app/src/logs")
        );
    }

    /// Повторное создание существующей директории успешно.
    #[test]
    fn test_create_directory_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");

        assert!(create_directory_if_missing(&dir));
        assert!(dir.is_dir());
        assert!(create_directory_if_missing(&dir));
    }

    #[test]
    fn test_create_directory_fails_over_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("occupied");
        fs::write(&file, "x").unwrap();

        assert!(!create_directory_if_missing(&file));
    }

    #[test]
    fn test_append_line_creates_and_appends() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.log");

        append_line(&path, "first").unwrap();
        append_line(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        assert_eq!(file_size(&path), 13);
    }

    #[test]
    fn test_file_size_and_remove_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.log");

        assert_eq!(file_size(&path), 0);
        assert!(remove_file(&path).is_ok());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(file_base_name("src/jobs/runner.rs"), "runner.rs");
        assert_eq!(file_base_name(r"src\jobs\runner.rs"), "runner.rs");
        assert_eq!(file_base_name("runner.rs"), "runner.rs");
        assert_eq!(file_stem("src/jobs/runner.rs"), "runner");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem(".hidden"), ".hidden");
        assert_eq!(file_stem("Makefile"), "Makefile");
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("logfile.log").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("../escape.log").is_err());
        assert!(validate_file_name("..").is_err());
    }
}
