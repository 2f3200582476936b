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

use crate::render::{render, validate_list_name, RenderError};
use crate::types::{AddressFamily, FilterList, Prefix};

fn list(name: &str, family: AddressFamily, prefixes: &[&str]) -> FilterList {
    FilterList {
        name: name.to_string(),
        family,
        prefixes: prefixes.iter().map(|p| p.parse::<Prefix>().unwrap()).collect(),
    }
}

#[test]
fn renders_ipv4_stanza() {
    let config =
        render(&list("CUSTOMERS", AddressFamily::Ipv4, &["10.0.0.0/8", "192.0.2.0/24"]))
            .unwrap();

    let expected = "policy-options {\n\
                    \x20   replace:\n\
                    \x20   prefix-list CUSTOMERS {\n\
                    \x20       10.0.0.0/8;\n\
                    \x20       192.0.2.0/24;\n\
                    \x20   }\n\
                    }\n";
    assert_eq!(config, expected);
}

#[test]
fn renders_ipv6_stanza() {
    let config = render(&list("CUSTOMERS-V6", AddressFamily::Ipv6, &["2001:db8::/32"])).unwrap();
    assert!(config.contains("prefix-list CUSTOMERS-V6 {"));
    assert!(config.contains("        2001:db8::/32;\n"));
}

#[test]
fn empty_list_renders_valid_stanza() {
    let config = render(&list("EMPTY", AddressFamily::Ipv4, &[])).unwrap();
    assert!(config.contains("prefix-list EMPTY {\n    }\n"));
    // balanced braces
    assert_eq!(config.matches('{').count(), config.matches('}').count());
}

#[test]
fn list_name_is_validated() {
    assert!(validate_list_name("CUSTOMERS").is_ok());
    assert!(validate_list_name("v4-transit_2026").is_ok());

    assert_eq!(
        validate_list_name("bad name!"),
        Err(RenderError::InvalidName("bad name!".to_string()))
    );
    assert!(validate_list_name("").is_err());
    assert!(validate_list_name("semi;colon").is_err());
    assert!(validate_list_name("brace{").is_err());
}

#[test]
fn render_rejects_bad_name() {
    let err = render(&list("bad name!", AddressFamily::Ipv4, &[])).unwrap_err();
    assert!(matches!(err, RenderError::InvalidName(_)));
}

#[test]
fn render_rejects_family_mismatch() {
    let err =
        render(&list("CUSTOMERS", AddressFamily::Ipv6, &["192.0.2.0/24"])).unwrap_err();
    assert!(matches!(err, RenderError::FamilyMismatch { .. }));
}
