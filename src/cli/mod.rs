use std::path::PathBuf;

use clap::Args;
use spr::{DecodeOptions, OutfitColors, Spr};

use crate::config::{parse_config, parse_config_from_file, Config};

use self::{export::Export, pack::Pack, palette::Palette, sheet::Sheet, sprite::Sprite};

mod export;
mod pack;
mod palette;
mod sheet;
mod sprite;

pub enum CliRes {
    Ok,
    Err,
}

pub trait Cli {
    fn name(&self) -> &'static str;
    /// Each module has to handle the arguments by itself.
    fn cli(&self) -> CliRes;
    fn cli_help(&self);
}

/// Runs command-line options
pub fn cli() -> CliRes {
    let args: Vec<String> = std::env::args().collect();

    // Add new modules here.
    let modules: &[&dyn Cli] = &[&Sprite, &Export, &Sheet, &Palette, &Pack];

    let help = || {
        println!(
            "\
sprtool

Available modules:"
        );
        for module in modules {
            println!("{}", module.name());
        }
    };

    if args.len() < 2 {
        help();
        return CliRes::Err;
    }

    if args[1] == "help" {
        match args.get(2) {
            Some(name) => match modules.iter().find(|module| module.name() == name) {
                Some(module) => module.cli_help(),
                None => help(),
            },
            None => help(),
        }

        return CliRes::Ok;
    }

    for module in modules {
        if args[1] == module.name() {
            return module.cli();
        }
    }

    // In case nothing fits then prints this again.
    help();

    CliRes::Err
}

/// Flags shared by every module that decodes sprites.
#[derive(Debug, Args)]
struct DecodeArgs {
    /// Path to .spr file
    #[arg(short, long)]
    spr: PathBuf,
    /// Paints transparent pixels with the color key instead
    #[arg(long)]
    no_transparent: bool,
    /// Recolors the outfit template colors
    #[arg(long)]
    outfit: bool,
    /// Path to config.toml. Defaults to the one next to the binary
    #[arg(long)]
    config: Option<PathBuf>,
}

impl DecodeArgs {
    fn config(&self) -> eyre::Result<Config> {
        match self.config.as_ref() {
            Some(path) => parse_config_from_file(path),
            None => parse_config(),
        }
    }

    fn options(&self, config: &Config) -> DecodeOptions {
        DecodeOptions {
            transparency: !self.no_transparent,
            remap: self.outfit.then(|| OutfitColors::from(config.outfit)),
        }
    }

    /// Opens the archive and resolves config. Prints the error and returns `None` on failure.
    fn load(&self) -> Option<(Spr, Config, DecodeOptions)> {
        let config = match self.config() {
            Ok(config) => config,
            Err(err) => {
                println!("Error parsing config: {}", err);
                return None;
            }
        };

        let spr = match Spr::open_from_file(&self.spr) {
            Ok(spr) => spr,
            Err(err) => {
                println!("Cannot open `{}`: {}", self.spr.display(), err);
                return None;
            }
        };

        let options = self.options(&config);

        Some((spr, config, options))
    }
}
