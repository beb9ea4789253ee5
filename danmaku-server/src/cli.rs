//! Command line interface

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "danmaku-server")]
#[command(author, version, about = "Danmaku comment stream converter and HTTP service")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert segment files into a single document
    Convert(ConvertArgs),

    /// Run the HTTP conversion service
    Serve,

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file
        #[arg(default_value = "danmaku.toml")]
        path: PathBuf,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Segment files of one video, in order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output document format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ass)]
    pub format: OutputFormat,

    /// Keep only comments sent on this local (UTC+8) date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// Keep only comments sent during this local hour, 0-23
    #[arg(long)]
    pub hour: Option<u32>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// XML comment document
    Xml,
    /// ASS subtitle script
    Ass,
    /// Decoded records as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::parse_from([
            "danmaku-server",
            "convert",
            "a.bin",
            "b.bin",
            "--format",
            "xml",
            "--date",
            "2024-05-01",
            "--hour",
            "23",
            "-o",
            "out.xml",
        ]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.inputs, [PathBuf::from("a.bin"), PathBuf::from("b.bin")]);
        assert_eq!(args.format, OutputFormat::Xml);
        assert_eq!(args.date.as_deref(), Some("2024-05-01"));
        assert_eq!(args.hour, Some(23));
        assert_eq!(args.output, Some(PathBuf::from("out.xml")));
    }

    #[test]
    fn test_convert_defaults_to_ass() {
        let cli = Cli::parse_from(["danmaku-server", "convert", "a.bin"]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.format, OutputFormat::Ass);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_convert_requires_input() {
        assert!(Cli::try_parse_from(["danmaku-server", "convert"]).is_err());
    }

    #[test]
    fn test_global_config() {
        let cli = Cli::parse_from(["danmaku-server", "serve", "--config", "danmaku.toml"]);
        assert!(matches!(cli.command, Commands::Serve));
        assert_eq!(cli.config, Some(PathBuf::from("danmaku.toml")));
    }
}
