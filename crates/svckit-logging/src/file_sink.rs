//! Rotating file sink
//!
//! Files are written by a daily [`RollingFileAppender`] as
//! `<dir>/<name>.<YYYY-MM-DD>`, and the appender keeps `<dir>/<name>` as a
//! symlink to the file currently being written, relinking it on rotation.
//! The sink sits behind a [`FileSlot`] so the file layer can be part of the
//! subscriber from the start and only begin writing once a sink is attached.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::{MakeWriter, OptionalWriter};

use crate::error::LoggingError;

/// Writer slot shared between the logger and its file layer.
///
/// Empty until a sink is attached; writes before that are discarded.
#[derive(Clone, Default)]
pub(crate) struct FileSlot {
    writer: Arc<OnceLock<NonBlocking>>,
}

impl FileSlot {
    /// Attach a writer. Returns false if one was already attached.
    pub(crate) fn attach(&self, writer: NonBlocking) -> bool {
        self.writer.set(writer).is_ok()
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.writer.get().is_some()
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = OptionalWriter<NonBlocking>;

    fn make_writer(&'a self) -> Self::Writer {
        match self.writer.get() {
            Some(writer) => OptionalWriter::some(writer.clone()),
            None => OptionalWriter::none(),
        }
    }
}

/// Number of files the appender may keep for a retention of
/// `max_age_days`: the file being written plus one per retained day.
pub(crate) fn retained_files(max_age_days: u64) -> usize {
    usize::try_from(max_age_days)
        .unwrap_or(usize::MAX)
        .saturating_add(1)
}

/// Open the daily appender for `<dir>/<file_name>`.
///
/// `<dir>/<file_name>` itself is the alias symlink. A regular file already
/// at that path is never replaced.
pub(crate) fn open_rolling(
    dir: &Path,
    file_name: &str,
    max_files: usize,
) -> Result<(RollingFileAppender, PathBuf), LoggingError> {
    std::fs::create_dir_all(dir)?;

    let alias = dir.join(file_name);
    match std::fs::symlink_metadata(&alias) {
        Ok(meta) if !meta.file_type().is_symlink() => {
            return Err(LoggingError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a symlink", alias.display()),
            )));
        }
        _ => {}
    }

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(file_name)
        .latest_symlink(file_name)
        .max_log_files(max_files)
        .build(dir)?;

    Ok((appender, alias))
}
