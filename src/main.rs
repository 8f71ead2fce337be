use clap::Parser;
use dynfont::cli::Cli;
use dynfont::config::Config;
use dynfont::run;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load();

    if let Err(e) = run(cli, config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
