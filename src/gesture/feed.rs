//! Landmark stream produced by an external hand tracker.
//!
//! The tracker writes one JSON object per line (see
//! [`HandLandmarks::parse_frame`]) to a file or FIFO. A background task parses
//! lines as they arrive; the tick loop drains whatever accumulated since the
//! previous tick without blocking.

use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};

use super::error::LandmarkError;
use super::landmarks::HandLandmarks;

/// One tracker frame. `hand` is `None` when no hand was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandFrame {
    pub hand: Option<HandLandmarks>,
}

type FrameMessage = Result<HandFrame, LandmarkError>;

pub struct LandmarkFeed {
    rx: UnboundedReceiver<FrameMessage>,
    ended: bool,
}

impl LandmarkFeed {
    /// Start reading frames from a file or named pipe
    pub async fn open(path: &Path) -> Result<Self, LandmarkError> {
        let file = tokio::fs::File::open(path).await?;
        log::info!("reading landmark frames from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Start reading frames from any buffered async reader
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(read_frames(reader, tx));
        Self { rx, ended: false }
    }

    /// Whether the tracker closed its end and every frame was consumed
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Most recent frame received since the last poll, without waiting.
    ///
    /// Older frames are discarded. A malformed frame is returned as an error
    /// even if valid frames followed it.
    pub fn poll_latest(&mut self) -> Result<Option<HandFrame>, LandmarkError> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(message) => latest = Some(message?),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.ended {
                        log::info!("landmark feed ended");
                    }
                    self.ended = true;
                    break;
                }
            }
        }
        Ok(latest)
    }
}

async fn read_frames<R>(reader: R, tx: UnboundedSender<FrameMessage>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0;

    loop {
        line_no += 1;
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                log::warn!("landmark feed read failed: {err}");
                let _ = tx.send(Err(err.into()));
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match HandLandmarks::parse_frame(&line) {
            Ok(hand) => {
                if tx.send(Ok(HandFrame { hand })).is_err() {
                    // receiver dropped, nobody is listening
                    break;
                }
            }
            Err(err) => {
                log::warn!("bad landmark frame on line {line_no}: {err}");
                let _ = tx.send(Err(LandmarkError::AtLine {
                    line: line_no,
                    source: Box::new(err),
                }));
                break;
            }
        }
    }
}
