//! URL source.
//!
//! Reads target URLs one per line from a file or standard input and feeds
//! them into the dispatcher's bounded queue.

use std::io::IsTerminal;
use std::path::Path;

use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::error_handling::InputError;

/// A line-oriented reader over the URL list.
pub type UrlReader = Box<dyn AsyncBufRead + Unpin + Send>;

/// Opens the URL list: `-` means standard input, anything else a file path.
///
/// # Errors
///
/// Returns `InputError::Open` if the file cannot be opened, or
/// `InputError::NoStdin` if `-` is given while stdin is an interactive terminal.
pub async fn open_url_source(input: &Path) -> Result<UrlReader, InputError> {
    if input.as_os_str() == "-" {
        if std::io::stdin().is_terminal() {
            return Err(InputError::NoStdin);
        }
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }

    let file = tokio::fs::File::open(input)
        .await
        .map_err(|source| InputError::Open {
            path: input.to_path_buf(),
            source,
        })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Sends every URL line from `reader` into `queue`, then drops the sender.
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Everything
/// else, malformed or not, is passed on for the parser to judge. Bytes that
/// are not valid UTF-8 are replaced with U+FFFD rather than ending the read.
/// Blocks while the queue is full.
///
/// # Returns
///
/// The number of lines queued.
///
/// # Errors
///
/// Returns `InputError::Read` if reading fails before end of input.
pub async fn feed_urls<R>(mut reader: R, queue: mpsc::Sender<String>) -> Result<usize, InputError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut queued = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if queue.send(trimmed.to_string()).await.is_err() {
            // All workers are gone; nothing left to feed.
            break;
        }
        queued += 1;
    }

    debug!("URL source exhausted after {queued} URLs");
    Ok(queued)
}
