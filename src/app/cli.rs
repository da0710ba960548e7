use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::model::ChainConnectivity;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Builds a 0/1 embedding model of a pattern graph in a host graph and solves it with Z3.", long_about = None)]
pub struct Cli {
    /// Host graph file ('n <id>' / 'e <a> <b>' lines)
    pub host: PathBuf,

    /// Pattern graph file, same format as the host graph
    pub pattern: PathBuf,

    /// Longest host chain (in edges) considered for refinement and connectivity.
    /// Path enumeration is exponential in this value.
    #[clap(short = 'k', long)]
    pub max_chain_length: u32,

    /// Minimum total number of host nodes used by the embedding
    #[clap(long, default_value_t = 0)]
    pub min_size: u32,

    /// Maximum total number of host nodes used [default: host node count]
    #[clap(long)]
    pub max_size: Option<u32>,

    /// Minimum fiber size per pattern node
    #[clap(long, default_value_t = 1)]
    pub fiber_min: u32,

    /// Maximum fiber size per pattern node [default: host node count]
    #[clap(long)]
    pub fiber_max: Option<u32>,

    /// Form of the chain-connectivity constraint
    #[clap(long, value_enum, default_value_t = ConnectivityArg::Binding)]
    pub connectivity: ConnectivityArg,

    /// Z3 timeout in milliseconds
    #[clap(long)]
    pub timeout_ms: Option<u64>,

    /// Where to write the full variable/constraint listing
    #[clap(long, default_value = "model_details.log")]
    pub model_log: PathBuf,

    /// Where to write the verbose run log
    #[clap(long, default_value = "embed.log")]
    pub log_file: PathBuf,

    /// Suppress verbose output, only printing the result or errors.
    #[clap(short, long)]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConnectivityArg {
    Binding,
    Literal,
}

impl From<ConnectivityArg> for ChainConnectivity {
    fn from(arg: ConnectivityArg) -> Self {
        match arg {
            ConnectivityArg::Binding => ChainConnectivity::Binding,
            ConnectivityArg::Literal => ChainConnectivity::Literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_and_default_arguments() {
        let cli = Cli::try_parse_from(["fiber-embed", "host.txt", "pattern.txt", "-k", "2"]).unwrap();
        assert_eq!(cli.max_chain_length, 2);
        assert_eq!(cli.min_size, 0);
        assert_eq!(cli.max_size, None);
        assert_eq!(cli.fiber_min, 1);
        assert_eq!(cli.connectivity, ConnectivityArg::Binding);
        assert_eq!(cli.log_file, PathBuf::from("embed.log"));
        assert!(!cli.quiet);
    }

    #[test]
    fn chain_length_is_required() {
        assert!(Cli::try_parse_from(["fiber-embed", "host.txt", "pattern.txt"]).is_err());
    }

    #[test]
    fn parses_literal_connectivity() {
        let cli = Cli::try_parse_from([
            "fiber-embed",
            "h",
            "p",
            "-k",
            "1",
            "--connectivity",
            "literal",
            "--fiber-max",
            "3",
            "-q",
        ])
        .unwrap();
        assert_eq!(ChainConnectivity::from(cli.connectivity), ChainConnectivity::Literal);
        assert_eq!(cli.fiber_max, Some(3));
        assert!(cli.quiet);
    }
}
