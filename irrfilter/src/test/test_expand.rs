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

use super::mock::MockSource;
use crate::registry::expand::{expand, ExpandError, ExpandLimits};
use crate::types::{AsSetMember, AsSetName, Asn};

use maplit::hashset;
use std::collections::HashSet;

fn limits(max_depth: usize, max_nodes: usize) -> ExpandLimits {
    ExpandLimits { max_depth, max_nodes }
}

#[test]
fn nested_sets_flatten_to_leaves() {
    let mut source = MockSource::new()
        .with_set("AS-EXAMPLE", &["AS65000", "AS-CHILD"])
        .with_set("AS-CHILD", &["AS65001"]);

    let expansion =
        expand(&mut source, &AsSetName::new("AS-EXAMPLE"), &ExpandLimits::default()).unwrap();

    assert_eq!(expansion.leaves, vec![Asn(65000), Asn(65001)]);
    // root, AS65000, AS-CHILD, AS65001
    assert_eq!(expansion.graph.node_count(), 4);
    assert_eq!(expansion.failed_sets, 0);
    assert!(expansion.graph.contains(&AsSetMember::Set(AsSetName::new("AS-CHILD"))));
}

#[test]
fn membership_cycle_terminates() {
    // AS-SETA and AS-SETB list each other; the cycle must close, not recurse forever
    let mut source = MockSource::new()
        .with_set("AS-SETA", &["AS-SETB", "AS1"])
        .with_set("AS-SETB", &["AS-SETA", "AS2"]);

    let expansion =
        expand(&mut source, &AsSetName::new("AS-SETA"), &ExpandLimits::default()).unwrap();

    // exactly the ASNs reachable before the cycle closes
    let leaves: HashSet<Asn> = expansion.leaves.iter().copied().collect();
    assert_eq!(leaves, hashset! {Asn(1), Asn(2)});
    assert_eq!(expansion.graph.node_count(), 4);
    // each set queried exactly once
    assert_eq!(source.queries, 2);
}

#[test]
fn self_referencing_set_terminates() {
    let mut source = MockSource::new().with_set("AS-LOOP", &["AS-LOOP", "AS7"]);

    let expansion =
        expand(&mut source, &AsSetName::new("AS-LOOP"), &ExpandLimits::default()).unwrap();

    assert_eq!(expansion.leaves, vec![Asn(7)]);
    assert_eq!(source.queries, 1);
}

/// Build a chain of `depth` nested sets below the root, with one ASN at the very bottom.
fn chain_source(depth: usize) -> MockSource {
    let mut source = MockSource::new();
    for i in 0..depth {
        let child = format!("AS-L{}", i + 1);
        source = source.with_set(&format!("AS-L{}", i), &[child.as_str()]);
    }
    source.with_set(&format!("AS-L{}", depth), &["AS65000"])
}

#[test]
fn depth_limit_is_exact() {
    // a chain of exactly max_depth sets below the root succeeds
    let mut source = chain_source(3);
    let expansion = expand(&mut source, &AsSetName::new("AS-L0"), &limits(3, 1000)).unwrap();
    assert_eq!(expansion.leaves, vec![Asn(65000)]);

    // one level more fails
    let mut source = chain_source(4);
    let err = expand(&mut source, &AsSetName::new("AS-L0"), &limits(3, 1000)).unwrap_err();
    match err {
        ExpandError::DepthLimitExceeded { depth, limit, .. } => {
            assert_eq!(depth, 4);
            assert_eq!(limit, 3);
        }
        e => panic!("expected DepthLimitExceeded, got {:?}", e),
    }
}

#[test]
fn node_limit_guards_fanout() {
    let members: Vec<String> = (1..=50).map(|i| format!("AS{}", i)).collect();
    let member_refs: Vec<&str> = members.iter().map(String::as_str).collect();
    let mut source = MockSource::new().with_set("AS-WIDE", &member_refs);

    let err = expand(&mut source, &AsSetName::new("AS-WIDE"), &limits(16, 10)).unwrap_err();
    match err {
        ExpandError::NodeLimitExceeded { limit } => assert_eq!(limit, 10),
        e => panic!("expected NodeLimitExceeded, got {:?}", e),
    }
}

#[test]
fn failed_nested_set_contributes_nothing() {
    let mut source = MockSource::new()
        .with_set("AS-ROOT", &["AS-BROKEN", "AS10"])
        .with_failing_set("AS-BROKEN");

    let expansion =
        expand(&mut source, &AsSetName::new("AS-ROOT"), &ExpandLimits::default()).unwrap();

    assert_eq!(expansion.leaves, vec![Asn(10)]);
    assert_eq!(expansion.failed_sets, 1);
}

#[test]
fn failed_root_is_fatal() {
    let mut source = MockSource::new().with_failing_set("AS-ROOT");

    let err =
        expand(&mut source, &AsSetName::new("AS-ROOT"), &ExpandLimits::default()).unwrap_err();
    assert!(matches!(err, ExpandError::Root(_)));
}

#[test]
fn leaves_in_first_discovery_order_without_duplicates() {
    let mut source = MockSource::new()
        .with_set("AS-ROOT", &["AS2", "AS-CHILD", "AS1"])
        .with_set("AS-CHILD", &["AS1", "AS3"]);

    let expansion =
        expand(&mut source, &AsSetName::new("AS-ROOT"), &ExpandLimits::default()).unwrap();

    assert_eq!(expansion.leaves, vec![Asn(2), Asn(1), Asn(3)]);
}

#[test]
fn invalid_member_tokens_are_counted() {
    let mut source = MockSource::new().with_set("AS-ROOT", &["AS1", "bogus", "12345"]);

    let expansion =
        expand(&mut source, &AsSetName::new("AS-ROOT"), &ExpandLimits::default()).unwrap();

    assert_eq!(expansion.leaves, vec![Asn(1)]);
    assert_eq!(expansion.invalid_members, 2);
}

#[test]
fn empty_root_set_yields_empty_result() {
    let mut source = MockSource::new().with_set("AS-EMPTY", &[]);

    let expansion =
        expand(&mut source, &AsSetName::new("AS-EMPTY"), &ExpandLimits::default()).unwrap();

    assert!(expansion.leaves.is_empty());
    assert_eq!(expansion.graph.node_count(), 1);
}
