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

//! # Filter generation
//! Wrapper functions tying the whole pipeline together: one call resolves an AS-SET and returns
//! the finished device stanza, either through the native registry session or through the
//! external `bgpq4` backend. Both paths produce the same artifact, so they are interchangeable
//! at the call site.

use crate::device::ConfigTarget;
use crate::registry::collect::collect;
use crate::registry::expand::{expand, ExpandLimits};
use crate::registry::external::Bgpq4;
use crate::registry::session::IrrSession;
use crate::registry::IrrSource;
use crate::render::{render, validate_list_name};
use crate::types::{AddressFamily, AsSetName, FilterList};
use crate::Error;

use itertools::Itertools;
use log::*;
use std::time::Duration;

/// Default public IRR mirror to query
pub const DEFAULT_SERVER: &str = "rr.ntt.net";
/// Standard IRRd query port
pub const DEFAULT_PORT: u16 = 43;
/// Default per-query deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which resolution backend to use
#[derive(Debug, Clone)]
pub enum Backend {
    /// The native IRRd protocol client
    Native,
    /// The external `bgpq4` tool, invoked as the given program
    Bgpq4 {
        /// Program name or path of the bgpq4 binary
        program: String,
    },
}

/// Everything one generation run needs to know
#[derive(Debug, Clone)]
pub struct FilterRequest {
    /// Root AS-SET to resolve
    pub as_set: AsSetName,
    /// Name of the generated prefix list
    pub list_name: String,
    /// Address family of the run
    pub family: AddressFamily,
    /// IRR server to query
    pub server: String,
    /// IRR query port
    pub port: u16,
    /// Per-query deadline
    pub timeout: Duration,
    /// Expansion guards
    pub limits: ExpandLimits,
    /// Resolution backend
    pub backend: Backend,
}

impl FilterRequest {
    /// Create a request with the default server, port, timeout, limits and native backend
    pub fn new(as_set: AsSetName, list_name: impl Into<String>, family: AddressFamily) -> Self {
        Self {
            as_set,
            list_name: list_name.into(),
            family,
            server: DEFAULT_SERVER.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            limits: ExpandLimits::default(),
            backend: Backend::Native,
        }
    }
}

/// Summary counters of a native resolution run, for the action log. Degraded sub-queries are
/// reported here instead of failing the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    /// Distinct nodes (sets and ASNs) in the membership graph
    pub graph_nodes: usize,
    /// Leaf ASNs resolved from the root AS-SET
    pub asns: usize,
    /// Unique prefixes in the final list
    pub prefixes: usize,
    /// Nested AS-SETs whose member query failed
    pub failed_sets: usize,
    /// Member tokens that were not valid references
    pub invalid_members: usize,
    /// ASNs whose route query failed
    pub failed_asns: usize,
    /// Route tokens that did not parse
    pub invalid_routes: usize,
}

impl RunStats {
    /// Whether any sub-query was degraded during the run
    pub fn degraded(&self) -> bool {
        self.failed_sets > 0 || self.failed_asns > 0
    }
}

/// The finished artifact of one run
#[derive(Debug)]
pub struct GeneratedFilter {
    /// Device-ready configuration text
    pub config: String,
    /// Run summary; `None` when the external backend produced the stanza opaquely
    pub stats: Option<RunStats>,
}

impl GeneratedFilter {
    /// Deliver the configuration to an output target.
    pub fn write_to(&self, target: &mut dyn ConfigTarget) -> Result<(), Error> {
        target.apply(&self.config)?;
        Ok(())
    }
}

/// Generate a prefix-filter stanza for the requested AS-SET.
///
/// The list name is validated before any network or subprocess activity, since it is the one
/// piece of user input that ends up inside generated configuration.
pub fn generate(request: &FilterRequest) -> Result<GeneratedFilter, Error> {
    validate_list_name(&request.list_name)?;

    match &request.backend {
        Backend::Bgpq4 { program } => {
            let backend = Bgpq4::new(program.clone(), request.server.clone());
            let config = backend.generate(
                request.as_set.as_str(),
                &request.list_name,
                request.family,
            )?;
            Ok(GeneratedFilter { config, stats: None })
        }
        Backend::Native => {
            info!("Resolving {} via {}:{}", request.as_set, request.server, request.port);
            let mut session = IrrSession::open(&request.server, request.port, request.timeout)?;
            generate_with_source(&mut session, request)
        }
    }
}

/// Run the native pipeline (expand, collect, render) against an already-open registry source.
/// Split out from [`generate`] so the pipeline can be exercised against any [`IrrSource`].
pub fn generate_with_source(
    source: &mut dyn IrrSource,
    request: &FilterRequest,
) -> Result<GeneratedFilter, Error> {
    validate_list_name(&request.list_name)?;

    let expansion = expand(source, &request.as_set, &request.limits)?;
    debug!("Resolved leaf ASNs: {}", expansion.leaves.iter().format(", "));
    let collected = collect(source, &expansion.leaves, request.family);

    let list = FilterList {
        name: request.list_name.clone(),
        family: request.family,
        prefixes: collected.prefixes,
    };
    let config = render(&list)?;

    let stats = RunStats {
        graph_nodes: expansion.graph.node_count(),
        asns: expansion.leaves.len(),
        prefixes: list.prefixes.len(),
        failed_sets: expansion.failed_sets,
        invalid_members: expansion.invalid_members,
        failed_asns: collected.failed_asns,
        invalid_routes: collected.invalid_routes,
    };

    if stats.degraded() {
        warn!(
            "Run degraded: {} member queries and {} route queries contributed nothing",
            stats.failed_sets, stats.failed_asns
        );
    }

    Ok(GeneratedFilter { config, stats: Some(stats) })
}
