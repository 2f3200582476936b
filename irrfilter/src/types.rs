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

//! Module containing all type definitions

use ipnetwork::IpNetwork;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Autonomous System Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Asn(pub u32);

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

/// Name of an AS-SET object in the registry (e.g. `AS-EXAMPLE` or the hierarchical form
/// `AS65000:AS-CUSTOMERS`). Names are stored uppercased, since RPSL object names are
/// case-insensitive. An `AsSetName` never has the lexical form of a bare ASN (`AS` followed only
/// by digits); such tokens are classified as [`Asn`] instead (see [`AsSetMember::classify`]).
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct AsSetName(String);

impl AsSetName {
    /// Create a new name, normalizing to uppercase.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_uppercase())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AsSetName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single member reference inside an AS-SET: either a nested AS-SET or a leaf ASN.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub enum AsSetMember {
    /// Reference to another AS-SET, to be expanded further
    Set(AsSetName),
    /// Leaf Autonomous System Number
    Asn(Asn),
}

impl AsSetMember {
    /// Classify a raw member token returned by the registry. Tokens of the form `AS<digits>` are
    /// ASNs, every other token starting with `AS` is taken as an AS-SET name. Anything else is
    /// not a valid member reference and yields `None`.
    pub fn classify(token: &str) -> Option<Self> {
        let token = token.trim().trim_end_matches(',');
        if token.len() < 3 {
            return None;
        }
        let upper = token.to_uppercase();
        if !upper.starts_with("AS") {
            return None;
        }
        if upper[2..].bytes().all(|b| b.is_ascii_digit()) {
            // Pure-numeric tail: a bare ASN. Numbers too large for 32 bits cannot be ASNs,
            // and they are not valid set names either.
            return upper[2..].parse::<u32>().ok().map(|n| Self::Asn(Asn(n)));
        }
        Some(Self::Set(AsSetName(upper)))
    }
}

impl fmt::Display for AsSetMember {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Set(name) => name.fmt(f),
            Self::Asn(asn) => asn.fmt(f),
        }
    }
}

/// Address family of a generated filter list
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum AddressFamily {
    /// IPv4
    Ipv4,
    /// IPv6
    Ipv6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Error while parsing a route line into a [`Prefix`]
#[derive(Debug, Error, PartialEq)]
pub enum PrefixParseError {
    /// The string is not in valid `address/length` notation
    #[error("Invalid prefix: {0}")]
    Invalid(String),
}

/// IP Prefix: a canonical network address and a mask length. The stored address always has all
/// host bits cleared, so structural equality is equality of the covered range. The derived
/// ordering (network address ascending, then mask length ascending) is the output order of
/// generated filter lists.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Prefix {
    addr: IpAddr,
    masklen: u8,
}

impl Prefix {
    /// Network address with host bits cleared
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Mask length
    pub fn masklen(&self) -> u8 {
        self.masklen
    }

    /// Address family of the prefix
    pub fn family(&self) -> AddressFamily {
        match self.addr {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }
}

impl FromStr for Prefix {
    type Err = PrefixParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let net: IpNetwork =
            s.trim().parse().map_err(|_| PrefixParseError::Invalid(s.to_string()))?;
        // IpNetwork keeps host bits as written; network() yields the canonical form.
        Ok(Self { addr: net.network(), masklen: net.prefix() })
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.masklen)
    }
}

/// The final artifact of one run: a named, ordered sequence of prefixes of a single address
/// family, ready to be rendered into device configuration.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct FilterList {
    /// Declared name of the prefix list
    pub name: String,
    /// Address family of every prefix in the list
    pub family: AddressFamily,
    /// Deduplicated prefixes, sorted by network address, then mask length
    pub prefixes: Vec<Prefix>,
}
