use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::modules::pack::pack_directory;

use super::*;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct PackCli {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Builds a .spr from a folder of `sprite_NNNNN.png`
    Pack {
        /// Folder with 32x32 PNGs
        #[arg(short, long)]
        input: PathBuf,
        /// Output .spr
        #[arg(short, long)]
        output: PathBuf,
        /// Header signature in hex
        #[arg(long, default_value = "0", value_parser = parse_hex_u32)]
        signature: u32,
    },
}

fn parse_hex_u32(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    u32::from_str_radix(digits, 16).map_err(|err| format!("`{}` is not a hex u32: {}", s, err))
}

pub struct Pack;

impl Cli for Pack {
    fn name(&self) -> &'static str {
        "pack"
    }

    fn cli(&self) -> CliRes {
        let cli = PackCli::parse();

        let Commands::Pack {
            input,
            output,
            signature,
        } = cli.command;

        match pack_directory(&input, &output, signature) {
            Ok(packed) => {
                println!("Packed {} sprites into {}", packed, output.display());
                CliRes::Ok
            }
            Err(err) => {
                println!("{}", err);
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        let _ = PackCli::command().print_help();
    }
}
