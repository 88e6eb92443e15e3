use clap::Parser;

use nf_cli::{run, CliArgs};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("netfuse: {e:#}");
        std::process::exit(1);
    }
}
