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

//! # IRR Registry Access
//!
//! Everything that talks to the Internet Routing Registry lives here:
//!
//! - [`IrrSession`](session::IrrSession): the native line-protocol client, speaking the IRRd
//!   query language over a single TCP connection.
//! - [`expand`](expand::expand): transitive AS-SET membership resolution with cycle and depth
//!   guards, producing a [`MembershipGraph`](expand::MembershipGraph).
//! - [`collect`](collect::collect): per-ASN route lookup, normalization and deduplication.
//! - [`Bgpq4`](external::Bgpq4): the external-tool backend, which replaces the whole native
//!   pipeline with a single subprocess invocation.
//!
//! The seam between the pipeline and the registry is the [`IrrSource`] trait. The native session
//! implements it, and tests exercise the expander and collector against an in-memory fake.

pub mod collect;
pub mod expand;
pub mod external;
pub mod session;

use crate::types::{AddressFamily, Asn, AsSetName};

use std::io;
use thiserror::Error;

/// Error of a single registry query
#[derive(Debug, Error)]
pub enum QueryError {
    /// The registry cannot be reached at all. Fatal for the whole run.
    #[error("Cannot connect to {host}:{port}: {source}")]
    Connection {
        /// Registry host that was dialed
        host: String,
        /// Query port that was dialed
        port: u16,
        /// Underlying socket or resolution error
        source: io::Error,
    },
    /// No full response was observed within the per-query deadline.
    #[error("Query {query:?} timed out")]
    Timeout {
        /// The query line that timed out
        query: String,
    },
    /// The response was malformed or truncated.
    #[error("Malformed response to query {query:?}: {reason}")]
    Protocol {
        /// The query line that produced the response
        query: String,
        /// What was wrong with the response
        reason: String,
    },
}

/// Query interface to an IRR registry. One level of AS-SET membership and per-ASN originated
/// routes, both returned as raw registry tokens. Classification and parsing of the tokens is the
/// caller's job, so a source does not need to understand RPSL lexical rules.
pub trait IrrSource {
    /// Return the direct (non-recursive) member tokens of an AS-SET.
    fn members(&mut self, set: &AsSetName) -> Result<Vec<String>, QueryError>;

    /// Return the route tokens originated by an ASN for the given address family.
    fn routes(&mut self, asn: Asn, family: AddressFamily) -> Result<Vec<String>, QueryError>;
}
