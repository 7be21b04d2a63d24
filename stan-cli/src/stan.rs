// Re-export the simulator's command line components
pub use stan_sim::{cli, STAN_CMD};

pub mod handlers {
    use anyhow::Result;
    use clap::ArgMatches;

    pub fn run_stan(matches: &ArgMatches) -> Result<()> {
        // Delegate to the simulator library's handler
        stan_sim::cli::handle_stan_command(matches)
    }
}
