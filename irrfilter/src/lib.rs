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

#![deny(missing_docs)]

//! # irrfilter: Generating BGP Prefix Filters from IRR AS-SETs
//!
//! This is a library for resolving the transitive membership of an AS-SET recorded in an
//! Internet Routing Registry, collecting the prefixes originated by every member ASN, and
//! rendering the result as a device-ready prefix-list stanza.
//!
//! ## Structure
//!
//! - **[`Registry`](registry)**: everything that talks to the registry. The native
//!   [`IrrSession`](registry::session::IrrSession) speaks the IRRd query protocol over TCP;
//!   [`expand`](registry::expand::expand) walks the AS-SET membership graph with cycle and depth
//!   guards; [`collect`](registry::collect::collect) gathers and deduplicates the originated
//!   prefixes; [`Bgpq4`](registry::external::Bgpq4) is the external-tool backend replacing all
//!   of the above with one subprocess call.
//!
//! - **[`Render`](render)**: pure conversion of a resolved [`FilterList`](types::FilterList)
//!   into Juniper `policy-options` syntax, including validation of the list name.
//!
//! - **[`Device`](device)**: output targets for the finished stanza. The shipped targets write
//!   to a stream or a file; an actual device push (SSH/NETCONF with lock, load and commit) is an
//!   external collaborator implementing the same [`ConfigTarget`](device::ConfigTarget) trait.
//!
//! All state of a run (session, membership graph, result set) is scoped to that run and passed
//! explicitly between the phases; there is no process-wide state. Queries are issued strictly
//! sequentially, one request and one full response at a time.
//!
//! ## Usage
//!
//! ```no_run
//! use irrfilter::types::{AddressFamily, AsSetName};
//! use irrfilter::{generate, Error, FilterRequest};
//!
//! fn main() -> Result<(), Error> {
//!     let request = FilterRequest::new(
//!         AsSetName::new("AS-EXAMPLE"),
//!         "CUSTOMERS",
//!         AddressFamily::Ipv4,
//!     );
//!     let filter = generate(&request)?;
//!     println!("{}", filter.config);
//!     Ok(())
//! }
//! ```

mod test;

mod error;
pub mod device;
pub mod registry;
pub mod render;
pub mod types;

mod generate;
pub use generate::{
    generate, generate_with_source, Backend, FilterRequest, GeneratedFilter, RunStats,
    DEFAULT_PORT, DEFAULT_SERVER, DEFAULT_TIMEOUT,
};

pub use error::Error;
