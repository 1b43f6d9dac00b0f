use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::modules::export::ExportAll;

use super::*;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct ExportCli {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extracts every sprite into a folder
    Export {
        #[command(flatten)]
        decode: DecodeArgs,
        /// Output folder. Created if missing
        #[arg(short, long)]
        output: PathBuf,
        /// Only exports the first N sprites
        #[arg(short, long)]
        max: Option<usize>,
    },
}

pub struct Export;

impl Cli for Export {
    fn name(&self) -> &'static str {
        "export"
    }

    fn cli(&self) -> CliRes {
        let cli = ExportCli::parse();

        let Commands::Export {
            decode,
            output,
            max,
        } = cli.command;

        let Some((spr, _, options)) = decode.load() else {
            return CliRes::Err;
        };

        let mut export = ExportAll::new();

        export.output_dir(output).max_sprites(max).options(options);

        match export.work(&spr) {
            Ok(report) => {
                println!(
                    "Exported {} sprites, {} empty or missing",
                    report.succeeded, report.failed
                );
                CliRes::Ok
            }
            Err(err) => {
                println!("{}", err);
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        let _ = ExportCli::command().print_help();
    }
}
