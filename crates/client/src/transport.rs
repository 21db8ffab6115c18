// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking line transport over TCP.
//!
//! One socket, one buffered reader. Lines come back strictly in arrival
//! order; any I/O failure closes the transport, since a half-read line
//! leaves the framing undefined.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::ClientError;

/// Smallest read timeout handed to the socket; zero means "block forever" to std.
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Longest reply line accepted, terminator included.
pub(crate) const MAX_LINE: usize = 1 << 20;

/// Socket deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            read: Duration::from_secs(10),
            write: Duration::from_secs(10),
        }
    }
}

pub struct Transport {
    stream: Option<BufReader<TcpStream>>,
    peer: String,
}

impl Transport {
    /// Open a socket to `host:port`, trying each resolved address in turn.
    pub fn connect(host: &str, port: u16, timeouts: Timeouts) -> Result<Self, ClientError> {
        let peer = format!("{host}:{port}");
        let connection_error =
            |source: io::Error| ClientError::Connection { addr: peer.clone(), source };

        let addrs = (host, port).to_socket_addrs().map_err(connection_error)?;
        let mut last_err =
            io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses");
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeouts.connect.max(MIN_TIMEOUT)) {
                Ok(stream) => {
                    stream.set_nodelay(true).map_err(connection_error)?;
                    stream
                        .set_write_timeout(Some(timeouts.write.max(MIN_TIMEOUT)))
                        .map_err(connection_error)?;
                    debug!(%peer, %addr, "connected");
                    return Ok(Self { stream: Some(BufReader::new(stream)), peer });
                }
                Err(e) => {
                    debug!(%addr, error = %e, "connect attempt failed");
                    last_err = e;
                }
            }
        }
        Err(connection_error(last_err))
    }

    /// Write one line, appending the terminator if missing.
    pub fn send_line(&mut self, line: &str) -> Result<(), ClientError> {
        let stream = self.stream.as_mut().ok_or(ClientError::ConnectionClosed)?;
        trace!(peer = %self.peer, line = line.trim_end(), "send");

        write_line(stream.get_mut(), line).map_err(|e| {
            self.close();
            ClientError::Write(e)
        })
    }

    /// Block until one complete line arrives or `timeout` elapses.
    ///
    /// The deadline covers the whole line, however slowly its bytes arrive.
    /// The returned line still carries its terminator.
    pub fn receive_line(&mut self, timeout: Duration) -> Result<String, ClientError> {
        let deadline = Instant::now() + timeout.max(MIN_TIMEOUT);
        let stream = self.stream.as_mut().ok_or(ClientError::ConnectionClosed)?;

        match read_line_until(stream, deadline) {
            Ok(line) => {
                trace!(peer = %self.peer, line = line.trim_end(), "recv");
                Ok(line)
            }
            Err(err) => {
                self.close();
                Err(err)
            }
        }
    }

    /// Release the socket. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.get_ref().shutdown(Shutdown::Both);
            debug!(peer = %self.peer, "transport closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }
}

fn read_line_until(
    stream: &mut BufReader<TcpStream>,
    deadline: Instant,
) -> Result<String, ClientError> {
    let mut line = Vec::new();
    loop {
        let remaining = deadline
            .checked_duration_since(Instant::now())
            .filter(|left| !left.is_zero())
            .ok_or(ClientError::ReadTimeout)?;
        stream
            .get_ref()
            .set_read_timeout(Some(remaining.max(MIN_TIMEOUT)))
            .map_err(|_| ClientError::ConnectionClosed)?;

        let available = match stream.fill_buf() {
            Ok([]) => return Err(ClientError::ConnectionClosed),
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(match e.kind() {
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => ClientError::ReadTimeout,
                    _ => ClientError::ConnectionClosed,
                })
            }
        };
        let (used, done) = match available.iter().position(|b| *b == b'\n') {
            Some(end) => (end + 1, true),
            None => (available.len(), false),
        };
        line.extend_from_slice(&available[..used]);
        stream.consume(used);

        if line.len() > MAX_LINE {
            return Err(ClientError::violation(format!("reply line exceeds {MAX_LINE} bytes")));
        }
        if done {
            return String::from_utf8(line)
                .map_err(|_| ClientError::violation("reply is not valid UTF-8"));
        }
    }
}

fn write_line(socket: &mut TcpStream, line: &str) -> io::Result<()> {
    socket.write_all(line.as_bytes())?;
    if !line.ends_with('\n') {
        socket.write_all(b"\n")?;
    }
    socket.flush()
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
