use std::{
    fs::File,
    io::{self, BufRead, BufReader, ErrorKind, Read},
    path::Path,
    time::Duration,
};

use crate::config::{SourceConfig, SourceKind};
use crate::error::{TrackerError, TrackerResult};
use crate::sample::MAX_LINE_LEN;

/// Produces raw lines of attitude data.
///
/// Lines are returned without their terminator. `Ok(None)` means the source
/// is exhausted and will not produce anything else.
pub trait SampleSource {
    fn next_line(&mut self) -> TrackerResult<Option<String>>;

    /// Human readable name used in logs and errors
    fn name(&self) -> &str;
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn next_line(&mut self) -> TrackerResult<Option<String>> {
        (**self).next_line()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Open the source a config describes.
///
/// The returned handle owns the file or port and closes it when dropped.
pub fn open_source(config: &SourceConfig) -> TrackerResult<Box<dyn SampleSource>> {
    config.validate()?;
    match config.kind() {
        SourceKind::File { path } => Ok(Box::new(FileReplay::open(path)?)),
        SourceKind::Serial { port, baud_rate } => {
            Ok(Box::new(LivePort::open(port, *baud_rate, config.interval())?))
        }
    }
}

fn strip_terminator(mut line: Vec<u8>) -> String {
    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }
    String::from_utf8_lossy(&line).into_owned()
}

/// Replays a recorded file line by line
pub struct FileReplay<R = BufReader<File>> {
    name: String,
    reader: R,
}

impl FileReplay {
    pub fn open(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TrackerError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Replaying {}", path.display());
        Ok(Self::from_reader(path.display().to_string(), BufReader::new(file)))
    }
}

impl<R: BufRead> FileReplay<R> {
    pub fn from_reader(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

impl<R: BufRead> SampleSource for FileReplay<R> {
    fn next_line(&mut self) -> TrackerResult<Option<String>> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(strip_terminator(buf))),
            Err(source) => Err(TrackerError::Read {
                name: self.name.clone(),
                source,
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Polls a serial device for newline terminated lines.
///
/// A read that times out yields an empty line. Bytes of a line that was
/// still incomplete at the timeout are kept and prefixed to the next line.
/// At most `MAX_LINE_LEN + 1` bytes are buffered: a longer run without a
/// newline is handed out as is (and rejected by the parser), and the rest of
/// it is discarded up to the next newline.
pub struct LivePort<P = Box<dyn serialport::SerialPort>> {
    name: String,
    reader: BufReader<P>,
    pending: Vec<u8>,
    discarding: bool,
}

impl LivePort {
    pub fn open(port: &str, baud_rate: u32, timeout: Duration) -> TrackerResult<Self> {
        let handle = serialport::new(port, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|source| TrackerError::PortOpen {
                port: port.to_string(),
                baud_rate,
                source,
            })?;
        log::info!("Opened {} at {} baud", port, baud_rate);
        Ok(Self::from_reader(port, handle))
    }
}

impl<P: Read> LivePort<P> {
    pub fn from_reader(name: impl Into<String>, port: P) -> Self {
        Self {
            name: name.into(),
            reader: BufReader::new(port),
            pending: Vec::new(),
            discarding: false,
        }
    }

    fn take_line(&mut self) -> String {
        strip_terminator(std::mem::take(&mut self.pending))
    }
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock)
}

impl<P: Read> SampleSource for LivePort<P> {
    fn next_line(&mut self) -> TrackerResult<Option<String>> {
        let limit = (MAX_LINE_LEN + 1).saturating_sub(self.pending.len()) as u64;
        match (&mut self.reader).take(limit).read_until(b'\n', &mut self.pending) {
            Err(err) if !is_timeout(&err) => {
                return Err(TrackerError::Read {
                    name: self.name.clone(),
                    source: err,
                })
            }
            // Nothing, part of a line or a whole line arrived. The port stays open.
            _ => {}
        }

        let complete = self.pending.last() == Some(&b'\n');
        let overflow = self.pending.len() > MAX_LINE_LEN;
        if !complete && !overflow {
            return Ok(Some(String::new()));
        }
        if self.discarding {
            self.pending.clear();
            self.discarding = !complete;
            return Ok(Some(String::new()));
        }
        if !complete {
            log::warn!("{}: no newline within {} bytes", self.name, MAX_LINE_LEN);
            self.discarding = true;
        }
        Ok(Some(self.take_line()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
