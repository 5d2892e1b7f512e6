// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::IpAddr;
use std::path::PathBuf;

use crate::AppEnvironment;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, clap::Parser)]
#[command(name = crate::BINARY_NAME, version = crate::VERSION)]
#[command(about = "Sign-In With Ethereum session server")]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(long, env = "SIWE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Interface to listen on
    #[arg(long)]
    pub address: Option<IpAddr>,

    /// Port to listen on, `0` picks a random one
    #[arg(long)]
    pub port: Option<u16>,

    /// Overrides the deployment environment from the configuration
    #[arg(long, value_enum)]
    pub environment: Option<AppEnvironment>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
