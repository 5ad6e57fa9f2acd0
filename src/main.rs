//! Fondscan CLI
//!
//! Characterize a directory or disk image: format identification with
//! siegfried, an optional ClamAV scan, CSV/SQLite/HTML reports.

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use fondscan_core::{HashAlgorithm, RunOptions};
use fondscan_pipeline::{Characterizer, Config, RunSummary, logging};
use std::path::{Path, PathBuf};
use std::process;

fn cli() -> Command {
    Command::new("fondscan")
        .version(clap::crate_version!())
        .about("Characterize a directory or disk image for digital preservation")
        .arg(
            Arg::new("source")
                .value_name("SOURCE")
                .help("Directory or disk image to characterize")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("destination")
                .value_name("DESTINATION")
                .help("Directory in which to create the output folder")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("basename")
                .value_name("BASENAME")
                .help("Name of the output folder and HTML report")
                .required(true),
        )
        .arg(
            Arg::new("noclam")
                .short('n')
                .long("noclam")
                .help("Skip the ClamAV virus scan")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diskimage")
                .short('d')
                .long("diskimage")
                .help("SOURCE is a disk image; recover its files with The Sleuth Kit first")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("allocated")
                .short('a')
                .long("allocated")
                .help("Recover allocated files only (disk images)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("removefiles")
                .short('r')
                .long("removefiles")
                .help("Delete recovered files when done (disk images)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("scanarchives")
                .short('z')
                .long("scanarchives")
                .help("Have siegfried look inside archives")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("largefiles")
                .short('l')
                .long("largefiles")
                .help("Raise ClamAV size limits to scan large files in full")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("hash")
                .long("hash")
                .value_name("ALGORITHM")
                .help("Checksum algorithm for siegfried")
                .value_parser(["md5", "sha1", "sha256", "sha512"])
                .default_value("md5"),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Replace an existing output folder")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log at debug level")
                .action(ArgAction::SetTrue),
        )
}

fn options_from(matches: &ArgMatches) -> anyhow::Result<RunOptions> {
    let source = matches
        .get_one::<PathBuf>("source")
        .context("missing SOURCE")?;
    let destination = matches
        .get_one::<PathBuf>("destination")
        .context("missing DESTINATION")?;
    let basename = matches
        .get_one::<String>("basename")
        .context("missing BASENAME")?;

    let mut options = RunOptions::new(source, destination, basename);
    options.virus_scan = !matches.get_flag("noclam");
    options.disk_image = matches.get_flag("diskimage");
    options.allocated_only = matches.get_flag("allocated");
    options.remove_carved = matches.get_flag("removefiles");
    options.scan_archives = matches.get_flag("scanarchives");
    options.large_files = matches.get_flag("largefiles");
    options.overwrite = matches.get_flag("overwrite");
    if let Some(hash) = matches.get_one::<String>("hash") {
        options.hash = hash.parse::<HashAlgorithm>()?;
    }
    Ok(options)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<RunSummary> {
    let config = load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    logging::init(&config.logging, matches.get_flag("verbose"))?;

    let options = options_from(matches)?;
    log::debug!("{options:?}");
    let summary = Characterizer::from_config(&config).run(&options)?;
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!("Characterized {} files", summary.records);
    if let Some(carved) = summary.carved_files {
        println!("Recovered from disk image: {carved}");
    }
    println!("Unidentified: {}", summary.stats.unidentified);
    println!("Duplicates: {}", summary.stats.duplicate_files);
    match &summary.virus_scan {
        Some(scan) if scan.is_clean() => println!("Virus scan: clean"),
        Some(scan) => println!(
            "Virus scan: {} infected files, see {}",
            scan.infected_files,
            summary.layout.virus_log().display()
        ),
        None => println!("Virus scan: skipped"),
    }
    println!("Report: {}", summary.html_report.display());
}

fn main() {
    let matches = cli().get_matches();

    match run(&matches) {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(1);
        }
    }
}
