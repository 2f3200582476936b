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

//! Per-ASN route collection
//!
//! For every leaf ASN of an expansion, query the routes it originates, parse them into
//! normalized prefixes and accumulate the structural-deduplicated union. Failures are absorbed
//! per ASN: an unreachable route object only makes the resulting permit list more restrictive,
//! which is the safe direction.

use super::IrrSource;
use crate::types::{AddressFamily, Asn, Prefix};

use log::*;
use std::collections::BTreeSet;

/// Accumulated result of the collection phase
#[derive(Debug)]
pub struct Collected {
    /// Deduplicated prefixes, sorted by network address ascending, then mask length ascending
    pub prefixes: Vec<Prefix>,
    /// Number of ASNs whose route query failed and which therefore contribute no prefixes
    pub failed_asns: usize,
    /// Number of route tokens that did not parse as a prefix of the requested family
    pub invalid_routes: usize,
}

/// Collect the prefixes originated by `leaves` for the requested address family.
///
/// Route tokens that do not parse, or that parse into the wrong address family, are skipped and
/// counted. A failed query means that ASN contributes nothing; the run continues.
pub fn collect(source: &mut dyn IrrSource, leaves: &[Asn], family: AddressFamily) -> Collected {
    // BTreeSet gives both the structural dedup and the output ordering, since Prefix orders by
    // (network address, mask length).
    let mut prefixes: BTreeSet<Prefix> = BTreeSet::new();
    let mut failed_asns = 0;
    let mut invalid_routes = 0;

    for &asn in leaves {
        let tokens = match source.routes(asn, family) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("Route query for {} failed, skipping it: {}", asn, e);
                failed_asns += 1;
                continue;
            }
        };
        debug!("{} originates {} route tokens", asn, tokens.len());
        for token in tokens {
            match token.parse::<Prefix>() {
                Ok(prefix) if prefix.family() == family => {
                    prefixes.insert(prefix);
                }
                Ok(prefix) => {
                    warn!("Ignoring {} from {}: wrong address family", prefix, asn);
                    invalid_routes += 1;
                }
                Err(_) => {
                    warn!("Ignoring unparseable route token {:?} from {}", token, asn);
                    invalid_routes += 1;
                }
            }
        }
    }

    info!(
        "Collected {} unique {} prefixes from {} ASNs ({} failed, {} invalid route tokens)",
        prefixes.len(),
        family,
        leaves.len(),
        failed_asns,
        invalid_routes
    );

    Collected { prefixes: prefixes.into_iter().collect(), failed_asns, invalid_routes }
}
