use clap::{CommandFactory, Parser, Subcommand};

use crate::{
    modules::sheet::write_sheet,
    utils::{constants::SPRITE_FILE_EXTENSION, misc::maybe_add_extension_to_string},
};

use super::*;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct SheetCli {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lays out sprites on one PNG, row-major from the top left
    Sheet {
        #[command(flatten)]
        decode: DecodeArgs,
        /// Output .png
        #[arg(short, long)]
        output: String,
        /// Sprites per row. Overrides config.toml
        #[arg(short, long)]
        per_row: Option<usize>,
        /// Only places the first N sprites
        #[arg(short, long)]
        max: Option<usize>,
    },
}

pub struct Sheet;

impl Cli for Sheet {
    fn name(&self) -> &'static str {
        "sheet"
    }

    fn cli(&self) -> CliRes {
        let cli = SheetCli::parse();

        let Commands::Sheet {
            decode,
            output,
            per_row,
            max,
        } = cli.command;

        let Some((spr, config, options)) = decode.load() else {
            return CliRes::Err;
        };

        let output = maybe_add_extension_to_string(&output, SPRITE_FILE_EXTENSION);
        let per_row = per_row.unwrap_or(config.sprites_per_row);

        match write_sheet(&spr, &output, per_row, max, &options) {
            Ok((width, height)) => {
                println!("Wrote {}x{} sheet to {}", width, height, output);
                CliRes::Ok
            }
            Err(err) => {
                println!("{}", err);
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        let _ = SheetCli::command().print_help();
    }
}
