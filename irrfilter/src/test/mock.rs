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

//! In-memory fake registry source for exercising the pipeline without a network

use crate::registry::{IrrSource, QueryError};
use crate::types::{AddressFamily, Asn, AsSetName};

use std::collections::{HashMap, HashSet};

/// A scripted registry: membership and route data are plain maps, and individual objects can be
/// marked as failing to simulate broken registry data.
#[derive(Debug, Default)]
pub struct MockSource {
    members: HashMap<String, Vec<String>>,
    routes: HashMap<(u32, AddressFamily), Vec<String>>,
    failing_sets: HashSet<String>,
    failing_asns: HashSet<u32>,
    /// Total number of queries issued against this source
    pub queries: usize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_set(mut self, name: &str, members: &[&str]) -> Self {
        self.members
            .insert(name.to_uppercase(), members.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_routes(mut self, asn: u32, family: AddressFamily, routes: &[&str]) -> Self {
        self.routes.insert((asn, family), routes.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_failing_set(mut self, name: &str) -> Self {
        self.failing_sets.insert(name.to_uppercase());
        self
    }

    pub fn with_failing_asn(mut self, asn: u32) -> Self {
        self.failing_asns.insert(asn);
        self
    }
}

impl IrrSource for MockSource {
    fn members(&mut self, set: &AsSetName) -> Result<Vec<String>, QueryError> {
        self.queries += 1;
        if self.failing_sets.contains(set.as_str()) {
            return Err(QueryError::Protocol {
                query: format!("!i{}", set),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(self.members.get(set.as_str()).cloned().unwrap_or_default())
    }

    fn routes(&mut self, asn: Asn, family: AddressFamily) -> Result<Vec<String>, QueryError> {
        self.queries += 1;
        if self.failing_asns.contains(&asn.0) {
            return Err(QueryError::Timeout { query: format!("!g{}", asn) });
        }
        Ok(self.routes.get(&(asn.0, family)).cloned().unwrap_or_default())
    }
}
