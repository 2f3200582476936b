// irrfilter: Generating BGP Prefix Filters from IRR AS-SETs
// Copyright (C) 2026  The irrfilter developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Native IRRd query-protocol client
//!
//! The IRRd query protocol is a stateful, line-oriented session on TCP port 43. After `!!`
//! switches the server into persistent mode, every query is a single request line answered by a
//! framed response:
//!
//! - `A<length>` followed by exactly `<length>` bytes of payload, terminated by a line starting
//!   with `C` (the end-of-record sentinel),
//! - a bare `C` line for success without data,
//! - `D` for a key that does not exist,
//! - `F <message>` for a query error.
//!
//! TCP is a byte stream, so a response may arrive in arbitrarily many segments; the reader
//! buffers and scans for the sentinel instead of assuming one read per response. The timeout is
//! a hard deadline per query, not per read: it is armed when the request line is sent, and every
//! socket read is bounded by the remaining budget, so a server trickling bytes cannot keep a
//! query alive past the deadline.

use super::{IrrSource, QueryError};
use crate::types::{AddressFamily, Asn, AsSetName};

use log::*;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// TCP stream whose reads are bounded by an armed deadline. Before every read, the remaining
/// budget is installed as the socket read timeout; an exhausted budget fails the read with
/// `TimedOut` without touching the socket.
#[derive(Debug)]
struct DeadlineStream {
    stream: TcpStream,
    deadline: Option<Instant>,
}

impl DeadlineStream {
    fn arm(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }
}

impl Read for DeadlineStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(deadline) = self.deadline {
            let remaining = deadline
                .checked_duration_since(Instant::now())
                .filter(|r| !r.is_zero())
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::TimedOut, "query deadline exceeded")
                })?;
            self.stream.set_read_timeout(Some(remaining))?;
        }
        self.stream.read(buf)
    }
}

impl Write for DeadlineStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

/// An open session to an IRRd-compatible registry server. The session owns the underlying TCP
/// connection for its whole lifetime; dropping the session sends `!q` (best effort) and closes
/// the socket, on success and error paths alike.
#[derive(Debug)]
pub struct IrrSession {
    reader: BufReader<DeadlineStream>,
    host: String,
    port: u16,
    timeout: Duration,
}

impl IrrSession {
    /// Open a connection to the registry and enable persistent query mode. The given timeout
    /// bounds the initial connect, every write, and every later query as a whole.
    pub fn open(host: &str, port: u16, timeout: Duration) -> Result<Self, QueryError> {
        let connection_error = |source| QueryError::Connection {
            host: host.to_string(),
            port,
            source,
        };

        let addr = (host, port)
            .to_socket_addrs()
            .map_err(connection_error)?
            .next()
            .ok_or_else(|| {
                connection_error(io::Error::new(
                    io::ErrorKind::NotFound,
                    "hostname did not resolve to any address",
                ))
            })?;

        debug!("Connecting to {} ({}:{})", addr, host, port);
        let stream = TcpStream::connect_timeout(&addr, timeout).map_err(connection_error)?;
        stream.set_read_timeout(Some(timeout)).map_err(connection_error)?;
        stream.set_write_timeout(Some(timeout)).map_err(connection_error)?;

        let mut session = Self {
            reader: BufReader::new(DeadlineStream { stream, deadline: None }),
            host: host.to_string(),
            port,
            timeout,
        };

        // Persistent mode: keep the connection open across multiple queries.
        session.send_line("!!")?;

        info!("Session established with {}:{}", session.host, session.port);
        Ok(session)
    }

    /// Issue a single query and return the payload exactly as transmitted, up to (and excluding)
    /// the end-of-record sentinel; only the record-terminating newline is removed. A `D` (key
    /// not found) response yields an empty payload. The configured timeout is a hard upper bound
    /// for the whole query, however many reads the response takes.
    pub fn query(&mut self, query: &str) -> Result<String, QueryError> {
        self.reader.get_mut().arm(Instant::now() + self.timeout);
        self.send_line(query)?;

        let status = self.read_line(query)?;
        trace!("Query {:?} -> status {:?}", query, status);

        if let Some(length) = status.strip_prefix('A') {
            let length: usize = length.trim().parse().map_err(|_| QueryError::Protocol {
                query: query.to_string(),
                reason: format!("invalid length in status line {:?}", status),
            })?;
            let data = self.read_payload(query, length)?;
            let sentinel = self.read_line(query)?;
            if !sentinel.starts_with('C') {
                return Err(QueryError::Protocol {
                    query: query.to_string(),
                    reason: format!("expected end-of-record sentinel, got {:?}", sentinel),
                });
            }
            Ok(data)
        } else if status.starts_with('C') || status.starts_with('D') {
            // C: success with no data, D: key not found. Both contribute nothing.
            Ok(String::new())
        } else if let Some(message) = status.strip_prefix('F') {
            Err(QueryError::Protocol {
                query: query.to_string(),
                reason: format!("registry reported an error: {}", message.trim()),
            })
        } else {
            Err(QueryError::Protocol {
                query: query.to_string(),
                reason: format!("unrecognized status line {:?}", status),
            })
        }
    }

    fn send_line(&mut self, line: &str) -> Result<(), QueryError> {
        let stream = self.reader.get_mut();
        stream
            .write_all(line.as_bytes())
            .and_then(|()| stream.write_all(b"\n"))
            .map_err(|e| Self::map_io(line, e))
    }

    /// Read one `\n`-terminated line. The buffered reader assembles it from however many TCP
    /// segments it takes; EOF before the newline is a truncated response.
    fn read_line(&mut self, query: &str) -> Result<String, QueryError> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).map_err(|e| Self::map_io(query, e))?;
        if n == 0 || !line.ends_with('\n') {
            return Err(QueryError::Protocol {
                query: query.to_string(),
                reason: "connection closed before the response was complete".to_string(),
            });
        }
        Ok(line.trim_end().to_string())
    }

    /// Read exactly `length` payload bytes and strip the single record-terminating newline,
    /// leaving all other payload bytes untouched.
    fn read_payload(&mut self, query: &str, length: usize) -> Result<String, QueryError> {
        let mut buf = vec![0u8; length];
        self.reader.read_exact(&mut buf).map_err(|e| Self::map_io(query, e))?;
        let mut data = String::from_utf8(buf).map_err(|_| QueryError::Protocol {
            query: query.to_string(),
            reason: "response payload is not valid UTF-8".to_string(),
        })?;
        if data.ends_with('\n') {
            data.pop();
        }
        Ok(data)
    }

    fn map_io(query: &str, error: io::Error) -> QueryError {
        use std::io::ErrorKind::*;
        match error.kind() {
            WouldBlock | TimedOut => QueryError::Timeout { query: query.to_string() },
            UnexpectedEof => QueryError::Protocol {
                query: query.to_string(),
                reason: "connection closed before the response was complete".to_string(),
            },
            _ => QueryError::Protocol {
                query: query.to_string(),
                reason: format!("I/O error while reading the response: {}", error),
            },
        }
    }
}

impl IrrSource for IrrSession {
    fn members(&mut self, set: &AsSetName) -> Result<Vec<String>, QueryError> {
        let data = self.query(&format!("!i{}", set))?;
        Ok(data.split_whitespace().map(str::to_string).collect())
    }

    fn routes(&mut self, asn: Asn, family: AddressFamily) -> Result<Vec<String>, QueryError> {
        let verb = match family {
            AddressFamily::Ipv4 => "!g",
            AddressFamily::Ipv6 => "!6",
        };
        let data = self.query(&format!("{}{}", verb, asn))?;
        Ok(data.split_whitespace().map(str::to_string).collect())
    }
}

impl Drop for IrrSession {
    fn drop(&mut self) {
        // Closing courtesy only; the socket is released regardless.
        let _ = self.send_line("!q");
        debug!("Session with {}:{} closed", self.host, self.port);
    }
}
