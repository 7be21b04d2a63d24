use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use anyhow::Result;
use crate::consts::*;

pub fn create_stan_cli() -> Command {
    Command::new(STAN_CMD)
        .about("Simulate targets and neighbors with marker regions")
        .version(VERSION)
        .subcommand_required(true)
        .subcommand(
            Command::new(SIMULATE_CMD)
                .about("Simulate target and neighbor sequences")
                .long_about(
                    "Simulate target and neighbor sequences under a coalescent with marker regions.\n\n\
                    Targets and neighbors grow as two coalescent partitions joined at a common root. \
                    Marker regions mutate at their own rate in neighbors and are deleted from \
                    them if that rate is negative.\n\n\
                    Example: stan simulate -t 7 -n 13 -r 1501-2000,3501-4000"
                )
                .arg(Arg::new("config")
                    .long("config")
                    .value_name("FILE")
                    .help("YAML or TOML configuration file; command line options take precedence")
                    .value_parser(clap::value_parser!(PathBuf)))
                .arg(Arg::new("targets")
                    .short('t')
                    .long("targets")
                    .value_name("NUMBER")
                    .help("Number of targets")
                    .value_parser(clap::value_parser!(usize))
                    .default_value(DEFAULT_TARGETS.to_string()))
                .arg(Arg::new("neighbors")
                    .short('n')
                    .long("neighbors")
                    .value_name("NUMBER")
                    .help("Number of neighbors")
                    .value_parser(clap::value_parser!(usize))
                    .default_value(DEFAULT_NEIGHBORS.to_string()))
                .arg(Arg::new("target_dir")
                    .short('T')
                    .long("target-dir")
                    .value_name("DIR")
                    .help("Target directory")
                    .value_parser(clap::value_parser!(PathBuf))
                    .default_value(DEFAULT_TARGET_DIR))
                .arg(Arg::new("neighbor_dir")
                    .short('N')
                    .long("neighbor-dir")
                    .value_name("DIR")
                    .help("Neighbor directory")
                    .value_parser(clap::value_parser!(PathBuf))
                    .default_value(DEFAULT_NEIGHBOR_DIR))
                .arg(Arg::new("length")
                    .short('l')
                    .long("length")
                    .value_name("NUMBER")
                    .help("Sequence length")
                    .value_parser(clap::value_parser!(usize))
                    .default_value(DEFAULT_LENGTH.to_string()))
                .arg(Arg::new("regions")
                    .short('r')
                    .long("regions")
                    .value_name("START-END,...")
                    .help("Marker regions, 1-based and inclusive")
                    .default_value(DEFAULT_REGIONS))
                .arg(Arg::new("mutation_rate")
                    .short('m')
                    .long("mutation-rate")
                    .value_name("THETA")
                    .help("Background mutation rate, theta per nucleotide")
                    .value_parser(clap::value_parser!(f64))
                    .default_value(DEFAULT_MUTATION_RATE.to_string()))
                .arg(Arg::new("marker_rate")
                    .short('M')
                    .long("marker-rate")
                    .value_name("THETA")
                    .help("Marker region mutation rate in neighbors, theta per nucleotide; delete if negative")
                    .value_parser(clap::value_parser!(f64))
                    .allow_negative_numbers(true)
                    .default_value(DEFAULT_MARKER_RATE.to_string()))
                .arg(Arg::new("seed")
                    .short('s')
                    .long("seed")
                    .value_name("NUMBER")
                    .help("Seed for random number generator (0 seeds from the clock)")
                    .value_parser(clap::value_parser!(u64))
                    .default_value("0"))
                .arg(Arg::new("print_tree")
                    .short('c')
                    .long("print-tree")
                    .help("Print coalescent tree")
                    .action(ArgAction::SetTrue))
                .arg(Arg::new("print_haplotypes")
                    .short('a')
                    .long("print-haplotypes")
                    .help("Print haplotypes")
                    .action(ArgAction::SetTrue))
                .arg(Arg::new("overwrite")
                    .short('o')
                    .long("overwrite")
                    .help("Overwrite existing directories")
                    .action(ArgAction::SetTrue))
        )
        .subcommand(
            Command::new(CONFIG_CMD)
                .about("Generate example YAML configuration file")
                .arg(Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .help("Output configuration file")
                    .value_parser(clap::value_parser!(PathBuf))
                    .default_value(DEFAULT_CONFIG_FILE))
        )
}

pub mod handlers {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::simulator::Simulator;
    use log::info;
    use stan_core::utils::{prepare_output_dir, write_sample_dir};
    use std::io::Write;

    /// Replace `value` with the argument `id` if it was given on the command line.
    fn override_from_cli<T>(matches: &ArgMatches, id: &str, value: &mut T)
    where
        T: Clone + Send + Sync + 'static,
    {
        if matches.value_source(id) != Some(ValueSource::CommandLine) {
            return;
        }
        if let Some(v) = matches.get_one::<T>(id) {
            *value = v.clone();
        }
    }

    ///
    /// Build the run configuration: built-in defaults, overlaid by the
    /// config file if one is given, overlaid by explicit command line options.
    ///
    pub fn config_from_matches(matches: &ArgMatches) -> Result<SimulationConfig> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };

        override_from_cli(matches, "targets", &mut config.targets);
        override_from_cli(matches, "neighbors", &mut config.neighbors);
        override_from_cli(matches, "target_dir", &mut config.target_dir);
        override_from_cli(matches, "neighbor_dir", &mut config.neighbor_dir);
        override_from_cli(matches, "length", &mut config.length);
        override_from_cli(matches, "regions", &mut config.regions);
        override_from_cli(matches, "mutation_rate", &mut config.mutation_rate);
        override_from_cli(matches, "marker_rate", &mut config.marker_rate);
        override_from_cli(matches, "seed", &mut config.seed);
        override_from_cli(matches, "print_tree", &mut config.print_tree);
        override_from_cli(matches, "print_haplotypes", &mut config.print_haplotypes);
        override_from_cli(matches, "overwrite", &mut config.overwrite);

        Ok(config)
    }

    ///
    /// Run one simulation and write its output.
    ///
    /// The configuration, including the marker regions, is validated before
    /// any directory is touched; the output directories are checked before
    /// the simulation starts.
    ///
    pub fn handle_simulate(matches: &ArgMatches) -> Result<()> {
        let config = config_from_matches(matches)?;
        let simulator = Simulator::new(config)?;
        let config = simulator.config();

        prepare_output_dir(&config.target_dir, config.overwrite)?;
        prepare_output_dir(&config.neighbor_dir, config.overwrite)?;

        info!("Running simulation with seed {}", simulator.seed());
        let simulation = simulator.run();

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if config.print_tree {
            writeln!(out, "{}", simulation.newick())?;
        }
        if config.print_haplotypes {
            simulation.write_haplotypes(&mut out)?;
        }
        out.flush()?;

        write_sample_dir(&config.target_dir, &simulation.targets, FASTA_LINE_WIDTH)?;
        write_sample_dir(&config.neighbor_dir, &simulation.neighbors, FASTA_LINE_WIDTH)?;

        Ok(())
    }

    pub fn handle_config(matches: &ArgMatches) -> Result<()> {
        let output_file = matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let yaml_content = format!(
            r#"# Configuration for stan simulate
# Command line options given alongside --config take precedence.

# Sample sizes
targets: {targets}
neighbors: {neighbors}

# Locus
length: {length}                # Sequence length
regions: "{regions}"        # Marker regions, 1-based and inclusive, comma-separated

# Mutation rates, theta per nucleotide
mutation_rate: {mutation_rate}         # Background rate (targets use it for marker sites, too)
marker_rate: {marker_rate}           # Marker rate in neighbors; negative deletes the marker regions

# Random number generator seed; 0 seeds from the clock
seed: 0

# Output, relative paths are resolved against this file's directory
target_dir: {target_dir}
neighbor_dir: {neighbor_dir}
overwrite: false
print_tree: false
print_haplotypes: false
"#,
            targets = DEFAULT_TARGETS,
            neighbors = DEFAULT_NEIGHBORS,
            length = DEFAULT_LENGTH,
            regions = DEFAULT_REGIONS,
            mutation_rate = DEFAULT_MUTATION_RATE,
            marker_rate = DEFAULT_MARKER_RATE,
            target_dir = DEFAULT_TARGET_DIR,
            neighbor_dir = DEFAULT_NEIGHBOR_DIR,
        );

        std::fs::write(&output_file, yaml_content)?;
        println!("Example configuration written to {}", output_file.display());

        Ok(())
    }
}

pub fn handle_stan_command(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some((SIMULATE_CMD, sub_matches)) => handlers::handle_simulate(sub_matches),
        Some((CONFIG_CMD, sub_matches)) => handlers::handle_config(sub_matches),
        _ => unreachable!("Subcommand required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    fn simulate_matches(args: &[&str]) -> ArgMatches {
        let matches = create_stan_cli()
            .try_get_matches_from(std::iter::once("stan").chain(std::iter::once(SIMULATE_CMD)).chain(args.iter().copied()))
            .unwrap();
        matches.subcommand_matches(SIMULATE_CMD).unwrap().clone()
    }

    #[rstest]
    fn test_cli_defaults_match_config_defaults() {
        let matches = simulate_matches(&[]);
        let config = handlers::config_from_matches(&matches).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[rstest]
    #[case("targets", DEFAULT_TARGETS.to_string())]
    #[case("neighbors", DEFAULT_NEIGHBORS.to_string())]
    #[case("length", DEFAULT_LENGTH.to_string())]
    #[case("mutation_rate", DEFAULT_MUTATION_RATE.to_string())]
    #[case("marker_rate", DEFAULT_MARKER_RATE.to_string())]
    #[case("regions", DEFAULT_REGIONS.to_string())]
    fn test_cli_default_values_come_from_consts(#[case] id: &str, #[case] expected: String) {
        let cli = create_stan_cli();
        let simulate = cli.find_subcommand(SIMULATE_CMD).unwrap();
        let arg = simulate.get_arguments().find(|a| a.get_id() == id).unwrap();
        let defaults: Vec<String> = arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect();
        assert_eq!(defaults, vec![expected]);
    }

    #[rstest]
    fn test_cli_flags() {
        let matches = simulate_matches(&[
            "-t", "7", "-n", "13", "-r", "1501-2000,3501-4000", "-M", "-0.2", "-s", "3", "-c", "-a", "-o",
        ]);
        let config = handlers::config_from_matches(&matches).unwrap();
        assert_eq!(config.targets, 7);
        assert_eq!(config.neighbors, 13);
        assert_eq!(config.regions, "1501-2000,3501-4000");
        assert_eq!(config.marker_rate, -0.2);
        assert_eq!(config.seed, 3);
        assert!(config.print_tree && config.print_haplotypes && config.overwrite);
    }

    #[rstest]
    fn test_cli_overrides_config_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("stan.yaml");
        std::fs::write(&path, "targets: 3\nneighbors: 4\nlength: 500\nregions: \"1-10\"\n").unwrap();

        let matches = simulate_matches(&["--config", path.to_str().unwrap(), "-n", "9"]);
        let config = handlers::config_from_matches(&matches).unwrap();

        assert_eq!(config.targets, 3);
        assert_eq!(config.neighbors, 9);
        assert_eq!(config.length, 500);
        assert_eq!(config.regions, "1-10");
    }

    #[rstest]
    fn test_generated_config_parses() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("stan_config.yaml");
        let matches = create_stan_cli()
            .try_get_matches_from(["stan", CONFIG_CMD, "-o", path.to_str().unwrap()])
            .unwrap();

        handle_stan_command(&matches).unwrap();

        let config = SimulationConfig::from_file(&path).unwrap();
        let defaults = SimulationConfig::default();
        assert_eq!(config.targets, defaults.targets);
        assert_eq!(config.regions, defaults.regions);
        assert_eq!(config.marker_rate, defaults.marker_rate);
        assert_eq!(config.target_dir, tmp.path().join(DEFAULT_TARGET_DIR));
    }
}
