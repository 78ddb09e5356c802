mod format;
pub use format::LogFormat;

mod level;
pub use level::LogLevel;

mod timer;
pub(crate) use timer::UtcRfc3339;
