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

//! Device configuration rendering
//!
//! Pure text generation, no I/O. The emitted stanza uses Juniper `policy-options` syntax with a
//! `replace:` tag, so loading it replaces the previous contents of the prefix list atomically.
//!
//! The list name is the only piece of user input that reaches the generated configuration, so it
//! is validated here against the device identifier syntax before anything else happens in a run.

use crate::types::{AddressFamily, FilterList, Prefix};

use std::fmt::Write;
use thiserror::Error;

/// Rendering errors
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// The list name does not conform to the device identifier syntax
    #[error("Invalid prefix-list name {0:?}: only alphanumerics, '-' and '_' are allowed")]
    InvalidName(String),
    /// A prefix of the wrong address family reached the renderer
    #[error("Prefix {prefix} does not belong to address family {family}")]
    FamilyMismatch {
        /// The offending prefix
        prefix: Prefix,
        /// The address family of the run
        family: AddressFamily,
    },
}

/// Check a prefix-list name against the device identifier syntax: nonempty, and only
/// alphanumerics, hyphens and underscores.
pub fn validate_list_name(name: &str) -> Result<(), RenderError> {
    if name.is_empty()
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(RenderError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Render a filter list into a Juniper `policy-options` stanza. An empty prefix sequence renders
/// a valid stanza declaring an empty list.
pub fn render(list: &FilterList) -> Result<String, RenderError> {
    validate_list_name(&list.name)?;
    for prefix in &list.prefixes {
        if prefix.family() != list.family {
            return Err(RenderError::FamilyMismatch { prefix: *prefix, family: list.family });
        }
    }

    let mut out = String::new();
    // Writing to a String cannot fail.
    writeln!(out, "policy-options {{").unwrap();
    writeln!(out, "    replace:").unwrap();
    writeln!(out, "    prefix-list {} {{", list.name).unwrap();
    for prefix in &list.prefixes {
        writeln!(out, "        {};", prefix).unwrap();
    }
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
    Ok(out)
}
