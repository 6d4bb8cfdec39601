pub mod console;
pub mod directory;
pub mod multi_file;
pub mod paths;
pub mod single_file;

// Publicly re-export the sink types to simplify access from external code.
pub use console::{ConsoleSink, MemorySink, StderrSink, StdoutSink};
pub use directory::{LogsDirectory, WriterState};
pub use multi_file::MultiFileWriter;
pub use single_file::{SingleFileWriter, DEFAULT_LOG_FILE_NAME, DEFAULT_MAX_SIZE_BYTES};
