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

//! External resolution backend
//!
//! `bgpq4` can substitute for the whole native pipeline (session, expander, collector and
//! renderer) in a single opaque call: it resolves the AS-SET against the registry itself and
//! emits a finished Juniper prefix-list stanza on stdout.

use crate::types::AddressFamily;

use log::*;
use std::io;
use std::process::Command;
use thiserror::Error;

/// Error of the external backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend program could not be started at all
    #[error("Cannot run {program:?}: {source}")]
    Spawn {
        /// The program that was invoked
        program: String,
        /// The underlying spawn error
        source: io::Error,
    },
    /// The backend program ran but reported failure
    #[error("{program:?} exited with {status}: {stderr}")]
    Failed {
        /// The program that was invoked
        program: String,
        /// Its exit status, as reported by the OS
        status: String,
        /// Captured standard error output
        stderr: String,
    },
    /// The backend emitted output that is not valid UTF-8
    #[error("{program:?} produced non-UTF-8 output")]
    InvalidOutput {
        /// The program that was invoked
        program: String,
    },
}

/// The `bgpq4` external-tool adapter
#[derive(Debug, Clone)]
pub struct Bgpq4 {
    program: String,
    server: String,
}

impl Bgpq4 {
    /// Create an adapter invoking `program` against the given IRR server
    pub fn new(program: impl Into<String>, server: impl Into<String>) -> Self {
        Self { program: program.into(), server: server.into() }
    }

    /// Resolve `as_set` and return the finished device stanza from the tool's stdout. The
    /// caller must have validated `list_name` already; it is passed to the tool verbatim.
    pub fn generate(
        &self,
        as_set: &str,
        list_name: &str,
        family: AddressFamily,
    ) -> Result<String, BackendError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-J").arg("-l").arg(list_name).arg("-h").arg(&self.server);
        if family == AddressFamily::Ipv6 {
            cmd.arg("-6");
        }
        cmd.arg(as_set);

        info!("Running {} for {} ({})", self.program, as_set, family);
        let output = cmd.output().map_err(|source| BackendError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(BackendError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|_| BackendError::InvalidOutput { program: self.program.clone() })
    }
}
