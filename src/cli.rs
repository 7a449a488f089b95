use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, ArgMatches, Command};
use pretty_env_logger::env_logger::Builder;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;

use snafu::ResultExt;

use r53sync::common::{OutputSnafu, Result};
use r53sync::document::Document;
use r53sync::route53::Route53Client;
use r53sync::service::R53Sync;
use r53sync::Config;

fn set_logger_level(b: &mut Builder, verbose: bool) {
    let mut b = b;
    if env::var("RUST_LOG").is_err() {
        b = b.filter_level(match verbose {
            true => log::LevelFilter::Debug,
            false => log::LevelFilter::Info,
        })
    }
    b.init();
}

fn setup_logger(verbose: bool) {
    // Adapted from env_logger examples. <3 Systemd support
    match std::env::var("RUST_LOG_STYLE") {
        Ok(s) if s == "SYSTEMD" => {
            let builder = &mut pretty_env_logger::env_logger::builder();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    match record.level() {
                        log::Level::Error => 3,
                        log::Level::Warn => 4,
                        log::Level::Info => 6,
                        log::Level::Debug => 7,
                        log::Level::Trace => 7,
                    },
                    record.target(),
                    record.args()
                )
            });
            set_logger_level(builder, verbose);
        }
        _ => {
            let builder = &mut pretty_env_logger::formatted_builder();
            set_logger_level(builder, verbose);
        }
    };
}

fn zone_arg() -> Arg {
    Arg::new("zone")
        .required(true)
        .help("Zone name, including the trailing dot")
}

fn file_arg() -> Arg {
    Arg::new("file")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Zone document (JSON)")
}

fn run(r53sync: &mut R53Sync<Route53Client>, args: &ArgMatches) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let zone = |sub: &ArgMatches| -> String {
        sub.get_one::<String>("zone")
            .expect("zone is required")
            .clone()
    };
    let document = |sub: &ArgMatches| -> Result<Document> {
        Document::load(sub.get_one::<PathBuf>("file").expect("file is required"))
    };

    match args.subcommand() {
        Some(("zones", _)) => r53sync.list_zones(&mut out),
        Some(("records", sub)) => r53sync.list_zone_record_sets(&zone(sub), &mut out),
        Some(("dump", sub)) => r53sync.dump(&zone(sub), &mut out),
        Some(("diff", sub)) => r53sync.diff(&document(sub)?, &mut out),
        Some(("sync", sub)) => {
            let document = document(sub)?;
            let stdin = std::io::stdin();
            let created = r53sync.sync(&document, &mut stdin.lock(), &mut out)?;
            writeln!(out, "Created {} record(s)", created.len()).context(OutputSnafu)
        }
        _ => unreachable!("subcommand is required"),
    }
}

pub(crate) fn main() {
    let cli = Command::new("r53sync")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Credentials are read from AWS_* or R53SYNC_ROUTE53__* environment variables.",
            "See the docs for more information.",
        ))
        .arg(
            Arg::new("verbose")
                .action(ArgAction::SetTrue)
                .short('v')
                .long("verbose")
                .global(true)
                .help("Enable debug logging"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("zones").about("List hosted zones"))
        .subcommand(
            Command::new("records")
                .about("List the record sets of a zone")
                .arg(zone_arg()),
        )
        .subcommand(
            Command::new("dump")
                .about("Print a zone document for a zone, without NS and SOA records")
                .arg(zone_arg()),
        )
        .subcommand(
            Command::new("diff")
                .about("Show records in the document that are missing from the zone")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("sync")
                .about("Create missing records, asking for confirmation for each")
                .arg(file_arg()),
        )
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger(args.get_flag("verbose"));

    let client = match Config::from_env().and_then(Config::into_client) {
        Ok(c) => c,
        Err(err) => {
            println!("{err}");
            exit(2);
        }
    };

    let mut r53sync = R53Sync::new(client);
    if let Err(err) = run(&mut r53sync, &args) {
        tracing::error!("{err}");
        exit(1);
    }
}
