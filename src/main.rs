use clap::Parser;

use crate::cli::Cli;
use dds_cube_viewer::args::Args;
use dds_cube_viewer::run;

mod cli;

fn main() {
    let cli = Cli::parse();
    run(Args {
        dds: Some(cli.dds),
        face_layout: cli.face_layout.into(),
    });
}
