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

use irrfilter::device::{ConfigTarget, FileTarget, StreamTarget};
use irrfilter::registry::expand::{ExpandLimits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
use irrfilter::types::{AddressFamily, AsSetName};
use irrfilter::{generate, Backend, FilterRequest, DEFAULT_PORT, DEFAULT_SERVER};

use clap::Parser;
use log::*;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// Generate a BGP prefix-list from an AS-SET recorded in an Internet Routing Registry. The
/// resolved filter is printed on standard output, or written to a file with `-o`. Resolution
/// uses the native IRRd protocol client, or `bgpq4` when `--use-bgpq4` is given.
#[derive(Parser, Debug)]
#[command(name = "irrfilter", version)]
struct CommandLineArguments {
    /// AS-SET to resolve (e.g. AS-EXAMPLE)
    #[arg(short = 'a', long = "as-set")]
    as_set: String,

    /// Name of the generated prefix-list
    #[arg(short = 'l', long = "list-name")]
    list_name: String,

    /// Generate an IPv6 prefix-list instead of IPv4
    #[arg(short = '6', long = "ipv6")]
    ipv6: bool,

    /// IRR server to query
    #[arg(short = 's', long, default_value = DEFAULT_SERVER)]
    server: String,

    /// IRR query port
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Maximum AS-SET nesting depth below the root
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum number of membership-graph nodes
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    max_nodes: usize,

    /// Use bgpq4 instead of the native IRR client
    #[arg(long = "use-bgpq4")]
    use_bgpq4: bool,

    /// Program name or path of the bgpq4 binary
    #[arg(long, default_value = "bgpq4")]
    bgpq4_path: String,

    /// Write the generated configuration to this file instead of standard output
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Test mode: print the configuration instead of writing the output file
    #[arg(short = 't', long = "test")]
    test: bool,
}

fn main() {
    pretty_env_logger::init();
    let args = CommandLineArguments::parse();

    let request = FilterRequest {
        as_set: AsSetName::new(&args.as_set),
        list_name: args.list_name.clone(),
        family: if args.ipv6 { AddressFamily::Ipv6 } else { AddressFamily::Ipv4 },
        server: args.server.clone(),
        port: args.port,
        timeout: Duration::from_secs(args.timeout),
        limits: ExpandLimits { max_depth: args.max_depth, max_nodes: args.max_nodes },
        backend: if args.use_bgpq4 {
            Backend::Bgpq4 { program: args.bgpq4_path.clone() }
        } else {
            Backend::Native
        },
    };

    info!("Generating {} prefix-list {} from {}", request.family, args.list_name, args.as_set);

    let filter = match generate(&request) {
        Ok(filter) => filter,
        Err(e) => {
            error!("Failed to generate the prefix-list: {}", e);
            process::exit(1);
        }
    };

    if let Some(stats) = &filter.stats {
        info!(
            "Resolved {} ASNs into {} prefixes ({} graph nodes)",
            stats.asns, stats.prefixes, stats.graph_nodes
        );
        if stats.degraded() {
            warn!(
                "Partial result: {} member queries and {} route queries contributed nothing",
                stats.failed_sets, stats.failed_asns
            );
        }
    }

    let mut target: Box<dyn ConfigTarget> = match (&args.output, args.test) {
        (Some(path), false) => Box::new(FileTarget::new(path)),
        _ => Box::new(StreamTarget::new(std::io::stdout(), "standard output")),
    };

    if let Err(e) = filter.write_to(target.as_mut()) {
        error!("Cannot write the configuration to {}: {}", target.describe(), e);
        process::exit(1);
    }
}
