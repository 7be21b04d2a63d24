mod stan;

use anyhow::Result;
use clap::Command;
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = super::stan::STAN_CMD;
}

fn build_parser() -> Command {
    stan::cli::create_stan_cli()
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Simulate Targets And Neighbors: coalescent simulation of target and neighbor sequences with marker regions.")
}

fn main() -> Result<()> {
    // RUST_LOG=info shows the run summary
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let app = build_parser();
    let matches = app.get_matches();

    stan::handlers::run_stan(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        build_parser().debug_assert();
    }

    #[test]
    fn test_parser_has_no_author() {
        assert!(build_parser().get_author().is_none());
    }
}
