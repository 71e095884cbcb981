//! Line-oriented terminal IO over any async reader/writer pair

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub struct Terminal<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print `prompt` without a newline and read one line.
    ///
    /// Returns `None` at end of input. The trailing line break is stripped.
    /// A line that is not UTF-8 is consumed whole and reported as
    /// [`io::ErrorKind::InvalidData`], so the next call reads the next line.
    pub async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes).await? == 0 {
            return Ok(None);
        }
        let mut line =
            String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Print `text` followed by a newline
    pub async fn say(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
