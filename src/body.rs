// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response body accumulation over chunk-at-a-time sources
//!
//! Platform HTTP stacks hand out a streaming body through two calls: "how
//! many bytes are ready" and "read that many". [`drain`] runs that
//! query/read/append cycle to completion, with lenient error handling:
//! failures end or skip an iteration, they never reach the caller. The
//! result is always a body, possibly empty or partial.

use std::io;

/// Staging buffer size for each underlying read.
const CHUNK_SIZE: usize = 8192;

/// Chunk-at-a-time view of a response body.
pub trait BodySource {
    /// Finish receiving the response so the body becomes readable.
    fn finish_receive(&mut self) -> io::Result<()>;

    /// Number of body bytes ready to read. Zero means the body is done.
    fn available(&mut self) -> io::Result<usize>;

    /// Read into `buf`, returning how many bytes were actually transferred.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Drain a response body to completion.
///
/// Queries [`BodySource::available`], reads that many bytes, appends only
/// what was actually transferred, and repeats until the source reports zero
/// bytes ready. A failed query ends the loop with whatever has accumulated;
/// a failed read skips to the next query, since read failures can be
/// transient while the stream itself is still alive.
pub fn drain<S: BodySource>(source: &mut S) -> Vec<u8> {
    let mut body = Vec::new();

    if let Err(e) = source.finish_receive() {
        tracing::warn!(error = %e, "failed to finish receiving response");
        return body;
    }

    loop {
        let available = match source.available() {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "failed to query available body bytes");
                break;
            }
        };
        if available == 0 {
            break;
        }

        let mut chunk = vec![0u8; available];
        let transferred = match source.read(&mut chunk) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read body chunk");
                continue;
            }
        };

        if transferred == 0 {
            // Bytes were reported ready but none arrived; treat as end of
            // body rather than query again.
            break;
        }
        if transferred < available {
            tracing::warn!(available, transferred, "short body read");
        }
        body.extend_from_slice(&chunk[..transferred]);
    }

    body
}

/// Adapter exposing any blocking reader as a [`BodySource`].
///
/// `available` stages up to 8 KiB from the underlying reader and reports
/// how much is staged; `read` hands the staged bytes out. This gives
/// sources that only offer [`io::Read`] the two-call shape [`drain`]
/// consumes.
pub struct ChunkedReader<R> {
    inner: R,
    staged: Vec<u8>,
    pos: usize,
}

impl<R: io::Read> ChunkedReader<R> {
    /// Wrap a blocking reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            staged: Vec::new(),
            pos: 0,
        }
    }
}

impl<R: io::Read> BodySource for ChunkedReader<R> {
    fn finish_receive(&mut self) -> io::Result<()> {
        // The wrapped reader is handed over fully received.
        Ok(())
    }

    fn available(&mut self) -> io::Result<usize> {
        if self.pos < self.staged.len() {
            return Ok(self.staged.len() - self.pos);
        }

        // Stage the next chunk. On error the staging buffer stays empty,
        // so a retried query reads again instead of reporting stale bytes.
        self.staged.clear();
        self.pos = 0;

        let mut buf = vec![0u8; CHUNK_SIZE];
        let n = loop {
            match self.inner.read(&mut buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        buf.truncate(n);
        self.staged = buf;
        Ok(n)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let staged = &self.staged[self.pos..];
        let n = staged.len().min(buf.len());
        buf[..n].copy_from_slice(&staged[..n]);
        self.pos += n;
        Ok(n)
    }
}
