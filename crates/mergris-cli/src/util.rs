use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;

/// Where report JSON goes: stdout by default, a file when requested.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File { writer: BufWriter<File>, path: PathBuf },
}

impl Output {
    pub fn create(path: Option<PathBuf>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("failed to create output file: {}", path.display()))?;
                Ok(Self::File {
                    writer: BufWriter::new(file),
                    path,
                })
            }
            None => Ok(Self::Stdout(io::stdout().lock())),
        }
    }

    /// Writes `value` as pretty JSON followed by a newline, then flushes.
    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let label = self.label();
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("failed to write JSON to {label}"))?;
        writeln!(self).with_context(|| format!("failed to write JSON to {label}"))?;
        self.flush()
            .with_context(|| format!("failed to flush {label}"))?;
        Ok(())
    }

    fn label(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_owned(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(writer) => writer.write(buf),
            Self::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(writer) => writer.flush(),
            Self::File { writer, .. } => writer.flush(),
        }
    }
}
