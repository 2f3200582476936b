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

//! Module containing all error types

use crate::registry::expand::ExpandError;
use crate::registry::external::BackendError;
use crate::registry::QueryError;
use crate::render::RenderError;
use std::io;
use thiserror::Error;

/// Main error type. Only structural failures reach this level: sub-query failures inside
/// expansion and collection are absorbed into "contributes nothing" and surfaced as summary
/// counts instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A registry query failed fatally (connection setup, or the root query itself)
    #[error("Registry error: {0}")]
    Query(#[from] QueryError),
    /// The membership expansion failed (root query, or a runaway graph)
    #[error("Expansion error: {0}")]
    Expand(#[from] ExpandError),
    /// Rendering failed (invalid list name, or a family mismatch)
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    /// The external backend failed
    #[error("External backend error: {0}")]
    Backend(#[from] BackendError),
    /// Writing the result to its output target failed
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}
