use clap::Parser;

mod app;
mod cli;
mod ui;

fn main() {
    if let Err(err) = cli::Cli::parse().run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
