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

//! Configuration output targets
//!
//! Where a finished stanza goes after generation. The device push itself (SSH or a management
//! API with lock/load/commit semantics) is an external collaborator implementing
//! [`ConfigTarget`]; the targets shipped here write to a stream (test/dry-run mode) or a file.
//! A target only ever receives a completely rendered stanza; no partial configuration exists.

use log::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A destination for a rendered configuration stanza
pub trait ConfigTarget {
    /// Deliver the complete stanza to the target
    fn apply(&mut self, config: &str) -> Result<(), io::Error>;

    /// Human-readable description of the target, for the action log
    fn describe(&self) -> String;
}

/// Target writing the stanza to an arbitrary stream, used for test/dry-run mode
#[derive(Debug)]
pub struct StreamTarget<W: Write> {
    writer: W,
    name: String,
}

impl<W: Write> StreamTarget<W> {
    /// Create a stream target with a descriptive name
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self { writer, name: name.into() }
    }
}

impl<W: Write> ConfigTarget for StreamTarget<W> {
    fn apply(&mut self, config: &str) -> Result<(), io::Error> {
        self.writer.write_all(config.as_bytes())?;
        self.writer.flush()
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Target writing the stanza to a file on disk
#[derive(Debug)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    /// Create a file target for the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl ConfigTarget for FileTarget {
    fn apply(&mut self, config: &str) -> Result<(), io::Error> {
        let mut file = File::create(&self.path)?;
        file.write_all(config.as_bytes())?;
        info!("Configuration written to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
