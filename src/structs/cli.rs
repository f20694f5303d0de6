use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "threatmodel")]
#[clap(about = "Submit architecture diagrams for STRIDE/DREAD threat modeling", long_about = None)]
#[clap(version)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
