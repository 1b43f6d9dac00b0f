use clap::{CommandFactory, Parser, Subcommand};

use crate::{
    modules::palette::write_palette_swatch,
    utils::{constants::SPRITE_FILE_EXTENSION, misc::maybe_add_extension_to_string},
};

use super::*;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct PaletteCli {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Writes the 256 color palette as a 16x16 PNG
    Palette {
        /// Output .png
        #[arg(short, long)]
        output: String,
    },
}

pub struct Palette;

impl Cli for Palette {
    fn name(&self) -> &'static str {
        "palette"
    }

    fn cli(&self) -> CliRes {
        let cli = PaletteCli::parse();

        let Commands::Palette { output } = cli.command;

        let output = maybe_add_extension_to_string(&output, SPRITE_FILE_EXTENSION);

        if let Err(err) = write_palette_swatch(&output) {
            println!("{}", err);
            return CliRes::Err;
        }

        CliRes::Ok
    }

    fn cli_help(&self) {
        let _ = PaletteCli::command().print_help();
    }
}
