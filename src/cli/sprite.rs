use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::{modules::export::export_sprite, utils::misc::sprite_file_name};

use super::*;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct SpriteCli {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extracts one sprite as a 32x32 PNG
    Sprite {
        #[command(flatten)]
        decode: DecodeArgs,
        /// 1-based sprite id
        #[arg(short, long)]
        id: usize,
        /// Output .png. A folder gets `sprite_NNNNN.png` inside it
        #[arg(short, long)]
        output: PathBuf,
    },
}

pub struct Sprite;

impl Cli for Sprite {
    fn name(&self) -> &'static str {
        "sprite"
    }

    fn cli(&self) -> CliRes {
        let cli = SpriteCli::parse();

        let Commands::Sprite { decode, id, output } = cli.command;

        let Some((spr, _, options)) = decode.load() else {
            return CliRes::Err;
        };

        let output = if output.is_dir() {
            output.join(sprite_file_name(id))
        } else {
            output
        };

        match export_sprite(&spr, id, &output, &options) {
            Ok(true) => {
                println!("Wrote {}", output.display());
                CliRes::Ok
            }
            Ok(false) => {
                println!(
                    "Sprite {} is empty or out of bounds ({} sprites)",
                    id,
                    spr.sprite_count()
                );
                CliRes::Err
            }
            Err(err) => {
                println!("{}", err);
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        let _ = SpriteCli::command().print_help();
    }
}
