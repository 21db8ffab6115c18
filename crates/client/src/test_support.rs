// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted in-process server for tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use sonar_wire::ChannelMode;

use crate::{ClientConfig, Timeouts};

/// How long the server waits for the client to connect or send a line.
const STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// How long the server keeps reading after its script ends.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// One server-side action.
#[derive(Debug, Clone)]
pub enum Step {
    /// Write a line, terminator appended.
    Send(String),
    /// Write bytes exactly as given.
    SendRaw(String),
    /// Read a line and compare it to the expected text (terminator stripped).
    Expect(String),
    /// Read a line, whatever it is.
    Receive,
    /// Sleep before the next step.
    Stall(Duration),
    /// Close the socket immediately.
    HangUp,
}

/// Ordered list of steps played against the first client that connects.
#[derive(Debug, Clone, Default)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(mut self, line: impl Into<String>) -> Self {
        self.steps.push(Step::Send(line.into()));
        self
    }

    pub fn send_raw(mut self, bytes: impl Into<String>) -> Self {
        self.steps.push(Step::SendRaw(bytes.into()));
        self
    }

    pub fn expect(mut self, line: impl Into<String>) -> Self {
        self.steps.push(Step::Expect(line.into()));
        self
    }

    pub fn receive(mut self) -> Self {
        self.steps.push(Step::Receive);
        self
    }

    pub fn stall(mut self, duration: Duration) -> Self {
        self.steps.push(Step::Stall(duration));
        self
    }

    pub fn hang_up(mut self) -> Self {
        self.steps.push(Step::HangUp);
        self
    }

    /// Append another script's steps.
    pub fn extend(mut self, other: Script) -> Self {
        self.steps.extend(other.steps);
        self
    }

    /// Greeting, `START <mode> <password>`, and a successful `STARTED`.
    pub fn handshake(self, mode: ChannelMode, password: &str) -> Self {
        self.send("CONNECTED <sonic-server v1.4.9>")
            .expect(format!("START {mode} {password}"))
            .send(format!("STARTED {mode} protocol(1) buffer(20000)"))
    }
}

/// What the server saw.
#[derive(Debug, Default)]
pub struct Transcript {
    /// Every line read from the client, in order, terminators stripped.
    pub received: Vec<String>,
    /// Expectations that did not hold. Empty when the script ran clean.
    pub mismatches: Vec<String>,
}

impl Transcript {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// A one-connection server running a [`Script`] on a background thread.
pub struct ScriptedServer {
    addr: SocketAddr,
    handle: JoinHandle<Transcript>,
}

impl ScriptedServer {
    /// Bind an ephemeral loopback port and start serving `script`.
    pub fn spawn(script: Script) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let handle = thread::spawn(move || serve(listener, script));
        Ok(Self { addr, handle })
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Client configuration pointing at this server, with short timeouts.
    pub fn config(&self, password: &str) -> ClientConfig {
        ClientConfig {
            host: self.host(),
            port: self.port(),
            password: password.to_string(),
            timeouts: Timeouts {
                connect: Duration::from_secs(2),
                read: Duration::from_secs(2),
                write: Duration::from_secs(2),
            },
        }
    }

    /// Wait for the script to finish and return what the server saw.
    ///
    /// Drop the client first: the server drains until the client hangs up.
    pub fn finish(self) -> Transcript {
        self.handle.join().unwrap_or_else(|_| Transcript {
            received: Vec::new(),
            mismatches: vec!["server thread panicked".to_string()],
        })
    }
}

fn serve(listener: TcpListener, script: Script) -> Transcript {
    let mut transcript = Transcript::default();
    let stream = match accept(&listener) {
        Ok(stream) => stream,
        Err(e) => {
            transcript.mismatches.push(format!("no client connected: {e}"));
            return transcript;
        }
    };
    let mut writer = match stream.try_clone() {
        Ok(writer) => writer,
        Err(e) => {
            transcript.mismatches.push(format!("cannot clone socket: {e}"));
            return transcript;
        }
    };
    let mut reader = BufReader::new(stream);

    for step in script.steps {
        let outcome = match step {
            Step::Send(line) => writer.write_all(format!("{line}\n").as_bytes()).map(|()| true),
            Step::SendRaw(bytes) => writer.write_all(bytes.as_bytes()).map(|()| true),
            Step::Expect(expected) => read_line(&mut reader, STEP_TIMEOUT).map(|line| {
                let matched = line.as_deref() == Some(expected.as_str());
                if !matched {
                    transcript.mismatches.push(format!("expected {expected:?}, got {line:?}"));
                }
                if let Some(line) = line {
                    transcript.received.push(line);
                }
                matched
            }),
            Step::Receive => read_line(&mut reader, STEP_TIMEOUT).map(|line| match line {
                Some(line) => {
                    transcript.received.push(line);
                    true
                }
                None => {
                    transcript.mismatches.push("expected a line, got EOF".to_string());
                    false
                }
            }),
            Step::Stall(duration) => {
                thread::sleep(duration);
                Ok(true)
            }
            Step::HangUp => return transcript,
        };
        match outcome {
            Ok(true) => {}
            Ok(false) => return transcript,
            Err(e) => {
                transcript.mismatches.push(format!("socket error: {e}"));
                return transcript;
            }
        }
    }

    // Keep the socket open until the client hangs up so it can read
    // everything written above.
    let deadline = Instant::now() + DRAIN_TIMEOUT;
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match read_line(&mut reader, remaining) {
            Ok(Some(line)) => transcript.received.push(line),
            Ok(None) | Err(_) => break,
        }
    }
    transcript
}

fn accept(listener: &TcpListener) -> io::Result<TcpStream> {
    listener.set_nonblocking(true)?;
    let deadline = Instant::now() + STEP_TIMEOUT;
    loop {
        match listener.accept() {
            Ok((stream, _)) => {
                stream.set_nonblocking(false)?;
                return Ok(stream);
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    return Err(io::Error::new(io::ErrorKind::TimedOut, "accept timed out"));
                }
                thread::sleep(Duration::from_millis(5));
            }
            Err(e) => return Err(e),
        }
    }
}

/// Read one line; `None` on EOF.
fn read_line(reader: &mut BufReader<TcpStream>, timeout: Duration) -> io::Result<Option<String>> {
    reader.get_ref().set_read_timeout(Some(timeout.max(Duration::from_millis(1))))?;
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
