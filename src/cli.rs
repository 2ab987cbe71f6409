use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, command, value_parser};

use crate::config::{Config, expand_path};
use crate::constants::{
    CONFIG_HELP, DRY_RUN_HELP, FOLDER_ID_HELP, LOG_FILE_HELP, MAX_DEPTH_HELP, MAX_RESULTS_HELP,
    OUTPUT_DIR_HELP, PATH_FORMAT_HELP, PATH_PATTERN_HELP, PATTERN_HELP, SOURCE_HELP, VERBOSE_HELP,
};
use crate::logging::LogLevel;

/// Builds the command-line interface
///
/// Defines the search arguments (`pattern`, `source`, `folder-id`,
/// `max-depth`, `max`), the output arguments (`dry-run`, `output-dir`,
/// `path-pattern`, `path-format`) and the ambient ones (`config`,
/// `log-file`, `verbose`).
pub fn build_command() -> Command {
    // define arg for the file name pattern
    let arg_pattern = Arg::new("pattern")
        .short('p')
        .long("pattern")
        .value_name("REGEX")
        .help(PATTERN_HELP);

    let arg_source = Arg::new("source")
        .short('s')
        .long("source")
        .value_name("DIR")
        .help(SOURCE_HELP);

    let arg_folder_id = Arg::new("folder_id")
        .short('f')
        .long("folder-id")
        .value_name("ID")
        .help(FOLDER_ID_HELP);

    let arg_max_depth = Arg::new("max_depth")
        .short('d')
        .long("max-depth")
        .value_name("N")
        .help(MAX_DEPTH_HELP)
        .allow_negative_numbers(true)
        .value_parser(value_parser!(i64).range(-1..));

    let arg_max_results = Arg::new("max_results")
        .short('m')
        .long("max")
        .value_name("N")
        .help(MAX_RESULTS_HELP)
        .value_parser(value_parser!(usize));

    // define arg for dry run
    let arg_dry = Arg::new("dry_run")
        .short('n')
        .long("dry-run")
        .help(DRY_RUN_HELP)
        .action(ArgAction::SetTrue);

    let arg_output_dir = Arg::new("output_dir")
        .short('o')
        .long("output-dir")
        .value_name("DIR")
        .help(OUTPUT_DIR_HELP);

    // the path transformation pair is all-or-nothing
    let arg_path_pattern = Arg::new("path_pattern")
        .long("path-pattern")
        .value_name("REGEX")
        .help(PATH_PATTERN_HELP)
        .requires("path_format");

    let arg_path_format = Arg::new("path_format")
        .long("path-format")
        .value_name("FORMAT")
        .help(PATH_FORMAT_HELP)
        .requires("path_pattern");

    // define arg for reading from a specific config file
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help(CONFIG_HELP)
        .value_parser(value_parser!(PathBuf));

    let arg_log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .value_name("FILE")
        .help(LOG_FILE_HELP)
        .value_parser(value_parser!(PathBuf));

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count);

    command!()
        .arg(arg_pattern)
        .arg(arg_source)
        .arg(arg_folder_id)
        .arg(arg_max_depth)
        .arg(arg_max_results)
        .arg(arg_dry)
        .arg(arg_output_dir)
        .arg(arg_path_pattern)
        .arg(arg_path_format)
        .arg(arg_config)
        .arg(arg_log_file)
        .arg(arg_verbose)
}

/// Parses the process arguments
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Gets the verbosity level from the number of -v/--verbose flags
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    LogLevel::from_occurrences(matches.get_count("verbose"))
}

/// Gets the log file requested on the command line, if any
pub fn get_log_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("log_file").cloned()
}

/// Gets the configuration file requested on the command line, if any
pub fn get_config_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("config").cloned()
}

/// Overrides configuration values with the flags given on the command line
///
/// A `--max-depth` of -1 and a `--max` of 0 both mean "unlimited".
pub fn apply_arguments(config: &mut Config, matches: &ArgMatches) {
    if let Some(pattern) = matches.get_one::<String>("pattern") {
        config.pattern = pattern.clone();
    }
    if let Some(source) = matches.get_one::<String>("source") {
        config.source = expand_path(source);
    }
    if let Some(folder_id) = matches.get_one::<String>("folder_id") {
        config.folder_id = Some(folder_id.clone());
    }
    if let Some(&max_depth) = matches.get_one::<i64>("max_depth") {
        config.max_depth = usize::try_from(max_depth).ok();
    }
    if let Some(&max_results) = matches.get_one::<usize>("max_results") {
        config.max_results = (max_results > 0).then_some(max_results);
    }
    if matches.get_flag("dry_run") {
        config.dry_run = true;
    }
    if let Some(output_dir) = matches.get_one::<String>("output_dir") {
        config.output_dir = expand_path(output_dir);
    }
    if let Some(path_pattern) = matches.get_one::<String>("path_pattern") {
        config.path_pattern = Some(path_pattern.clone());
    }
    if let Some(path_format) = matches.get_one::<String>("path_format") {
        config.path_format = Some(path_format.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        build_command()
            .try_get_matches_from(std::iter::once("dfetch").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_apply_arguments_overrides_config() {
        let matches = parse(&[
            "--pattern",
            r"\.TRANSCRIPT$",
            "--max-depth",
            "3",
            "--max",
            "5",
            "--dry-run",
            "--output-dir",
            "downloads",
        ]);
        let mut config = Config::default();
        apply_arguments(&mut config, &matches);

        assert_eq!(config.pattern, r"\.TRANSCRIPT$");
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.max_results, Some(5));
        assert!(config.dry_run);
        assert_eq!(config.output_dir, PathBuf::from("downloads"));
    }

    #[test]
    fn test_unlimited_sentinels() {
        let matches = parse(&["--pattern", "x", "--max-depth", "-1", "--max", "0"]);
        let mut config = Config {
            max_depth: Some(2),
            max_results: Some(2),
            ..Config::default()
        };
        apply_arguments(&mut config, &matches);

        assert_eq!(config.max_depth, None);
        assert_eq!(config.max_results, None);
    }

    #[test]
    fn test_missing_flags_keep_config_values() {
        let matches = parse(&[]);
        let mut config = Config {
            pattern: "from-file".to_string(),
            ..Config::default()
        };
        apply_arguments(&mut config, &matches);
        assert_eq!(config.pattern, "from-file");
    }

    #[test]
    fn test_path_flags_must_be_paired() {
        let result = build_command().try_get_matches_from([
            "dfetch",
            "--pattern",
            "x",
            "--path-pattern",
            "(?P<d>.*)",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_max_depth_below_minus_one_is_rejected() {
        let result =
            build_command().try_get_matches_from(["dfetch", "--max-depth", "-2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_count() {
        assert_eq!(get_verbosity(&parse(&[])), LogLevel::Info);
        assert_eq!(get_verbosity(&parse(&["-vv"])), LogLevel::Trace);
    }
}
