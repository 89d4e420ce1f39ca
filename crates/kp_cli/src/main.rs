use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use kp_config::Config;
use kp_ephem::AnalyticEphemeris;
use kp_search::{HoraryResolver, SearchRequest, SearchWindow, resolve_batch};
use kp_time::{civil_to_jd_ut, parse_utc_offset};
use kp_vedic_base::{
    DegreeFormat, GeoLocation, SubDivisionTable, kp_lords_in, load_partition_csv, parse_dms,
    write_partition_csv,
};
use tracing::info;

mod batch_io;
mod logger;
mod report;

#[derive(Parser)]
#[command(name = "kp", version, about = "KP horary (Prashna) ascendant-time resolver")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find when a horary number rises on a day and cast the chart
    Horary(HoraryArgs),
    /// Print the 249 sub-divisions
    Table {
        /// CSV partition-file format
        #[arg(long)]
        csv: bool,
        /// Write degrees as D:M:S in CSV output
        #[arg(long)]
        dms: bool,
    },
    /// Horary division containing a sidereal longitude
    Locate {
        /// Sidereal longitude, decimal degrees or D:M:S
        #[arg(allow_hyphen_values = true)]
        deg: String,
    },
    /// Full KP lord chain of a sidereal longitude
    Lords {
        /// Sidereal longitude, decimal degrees or D:M:S
        #[arg(allow_hyphen_values = true)]
        deg: String,
    },
    /// Resolve every row of a CSV request file
    Batch {
        /// Columns: horary_number,date,latitude_deg,longitude_deg,utc_offset[,ayanamsha]
        input: PathBuf,
        /// Worker threads (default from config)
        #[arg(long)]
        workers: Option<usize>,
        /// Output CSV (default stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check a partition CSV file
    ValidateTable {
        path: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args)]
struct HoraryArgs {
    /// Horary number, 1-249
    number: u32,
    /// Local date of the question (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
    /// UTC offset such as +5:30 or -03:00
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,
    /// Ayanamsha name (KP, Lahiri, Raman, ...)
    #[arg(long)]
    ayanamsha: Option<String>,
    /// House system (Placidus, Equal, Sripati, WholeSign)
    #[arg(long)]
    house_system: Option<String>,
    /// Start the search at this local time (HH:MM[:SS]) instead of midnight
    #[arg(long)]
    from: Option<String>,
    /// End the search at this local time (24:00 allowed) instead of the next
    /// midnight; a time at or before --from belongs to the next day
    #[arg(long)]
    to: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logger::init_cli_logger(cli.verbose, config.log_level());

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(Config::default()),
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Horary(args) => horary(args, config, cli.json),

        Commands::Table { csv, dms } => {
            let table = config.partition_table()?;
            if *csv {
                let format = if *dms { DegreeFormat::Dms } else { DegreeFormat::Decimal };
                write_partition_csv(&table, io::stdout().lock(), format)?;
            } else if cli.json {
                println!("{}", serde_json::to_string_pretty(table.as_slice())?);
            } else {
                report::print_table(&table);
            }
            Ok(())
        }

        Commands::Locate { deg } => {
            let table = config.partition_table()?;
            let d = table.locate(parse_degrees(deg)?);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(d)?);
            } else {
                println!("{}", report::division_line(d));
            }
            Ok(())
        }

        Commands::Lords { deg } => {
            let table = config.partition_table()?;
            let lords = kp_lords_in(&table, parse_degrees(deg)?);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&lords)?);
            } else {
                report::print_lords(&lords);
            }
            Ok(())
        }

        Commands::Batch {
            input,
            workers,
            out,
        } => batch(input, *workers, out.as_deref(), config),

        Commands::ValidateTable { path } => {
            let table = load_partition_csv(path)
                .with_context(|| format!("validating {}", path.display()))?;
            let differs = table
                .iter()
                .zip(SubDivisionTable::kp())
                .filter(|(a, b)| {
                    a.sign_lord != b.sign_lord
                        || a.nakshatra_lord != b.nakshatra_lord
                        || a.sub_lord != b.sub_lord
                        || (a.start_deg - b.start_deg).abs() > 1e-6
                })
                .count();
            println!(
                "{}: {} divisions, contiguous, spans sum to {:.9} deg",
                path.display(),
                table.len(),
                table.total_span_deg()
            );
            if differs > 0 {
                println!("{differs} divisions differ from the built-in KP table");
            }
            Ok(())
        }

        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Decimal degrees, or D:M:S.
fn parse_degrees(s: &str) -> Result<f64> {
    parse_dms(s).with_context(|| format!("cannot parse '{s}' as degrees"))
}

fn parse_local_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .with_context(|| format!("cannot parse '{s}' as HH:MM[:SS]"))
}

/// Local time on `date` as JD UT; `24:00` is the following midnight.
fn local_jd(date: NaiveDate, time: &str, offset: FixedOffset) -> Result<f64> {
    let at = match time.trim() {
        "24:00" | "24:00:00" => date
            .succ_opt()
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .with_context(|| format!("no day after {date}"))?,
        t => date.and_time(parse_local_time(t)?),
    };
    Ok(civil_to_jd_ut(at, offset)?)
}

/// `--from`/`--to` as a search window; `None` when neither is given.
fn time_window(args: &HoraryArgs, offset: FixedOffset) -> Result<Option<SearchWindow>> {
    if args.from.is_none() && args.to.is_none() {
        return Ok(None);
    }
    let day = SearchWindow::local_day(args.date, offset)?;
    let start = match &args.from {
        Some(t) => local_jd(args.date, t, offset)?,
        None => day.start_jd_ut,
    };
    let mut end = match &args.to {
        Some(t) => local_jd(args.date, t, offset)?,
        None => day.end_jd_ut,
    };
    // an end at or before the start runs past midnight
    if end <= start {
        end += 1.0;
    }
    Ok(Some(SearchWindow::new(start, end)?))
}

fn location(args: &HoraryArgs, config: &Config) -> Result<GeoLocation> {
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Ok(GeoLocation::new(lat, lon, 0.0)),
        (None, None) => config
            .location()?
            .context("no location: pass --lat and --lon or set chart.latitude_deg/longitude_deg"),
        _ => bail!("--lat and --lon must be given together"),
    }
}

fn horary(args: &HoraryArgs, config: &Config, json: bool) -> Result<()> {
    let table = config.partition_table()?;
    let ephemeris = AnalyticEphemeris::new();

    let mut horary_config = config.horary_config()?;
    if let Some(hs) = &args.house_system {
        horary_config.bhava_system = hs.parse()?;
    }
    let ayanamsha = match &args.ayanamsha {
        Some(name) => name.parse()?,
        None => config.ayanamsha()?,
    };
    let offset = match &args.utc_offset {
        Some(s) => parse_utc_offset(s)?,
        None => config
            .utc_offset()?
            .context("no UTC offset: pass --utc-offset or set chart.utc_offset")?,
    };

    let mut request = SearchRequest::new(args.number, args.date, location(args, config)?, offset)
        .with_ayanamsha(ayanamsha);
    if let Some(window) = time_window(args, offset)? {
        request = request.with_window(window);
    }

    let resolver = HoraryResolver::new(&table, &ephemeris, horary_config);
    let resolution = resolver.resolve(&request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        report::print_resolution(&resolution);
    }
    Ok(())
}

fn batch(input: &Path, workers: Option<usize>, out: Option<&Path>, config: &Config) -> Result<()> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let requests = batch_io::read_requests(BufReader::new(file), config.ayanamsha()?)?;
    let table = config.partition_table()?;
    let ephemeris = AnalyticEphemeris::new();
    let resolver = HoraryResolver::new(&table, &ephemeris, config.horary_config()?);

    let results = resolve_batch(&resolver, &requests, workers.unwrap_or(config.workers()));
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(requests = requests.len(), failed, "batch finished");

    match out {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            batch_io::write_results(BufWriter::new(file), &requests, &results)?;
        }
        None => batch_io::write_results(io::stdout().lock(), &requests, &results)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_decimal_and_dms() {
        assert!((parse_degrees("48.5").unwrap() - 48.5).abs() < 1e-12);
        assert!((parse_degrees("47:46:40").unwrap() - 430.0 / 9.0).abs() < 1e-9);
        assert!((parse_degrees(" -10 ").unwrap() + 10.0).abs() < 1e-12);
        assert!(parse_degrees("abc").is_err());
        assert!(parse_degrees("NaN").is_err());
    }

    #[test]
    fn local_time_with_and_without_seconds() {
        assert_eq!(parse_local_time("13:45").unwrap(), NaiveTime::from_hms_opt(13, 45, 0).unwrap());
        assert_eq!(parse_local_time("06:05:30").unwrap(), NaiveTime::from_hms_opt(6, 5, 30).unwrap());
        assert!(parse_local_time("25:00").is_err());
    }

    fn horary_args(extra: &[&str]) -> HoraryArgs {
        let mut argv = vec!["kp", "horary", "34", "--date", "2024-02-05"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Horary(args) => args,
            _ => panic!("expected horary"),
        }
    }

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    #[test]
    fn window_defaults_to_none() {
        assert!(time_window(&horary_args(&[]), ist()).unwrap().is_none());
    }

    #[test]
    fn window_can_end_at_next_midnight() {
        let day = SearchWindow::local_day(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(), ist()).unwrap();
        let w = time_window(&horary_args(&["--from", "18:00", "--to", "24:00"]), ist())
            .unwrap()
            .unwrap();
        assert!((w.end_jd_ut - day.end_jd_ut).abs() < 1e-6);
        assert!((w.duration_days() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn window_end_before_start_runs_past_midnight() {
        let w = time_window(&horary_args(&["--from", "22:00", "--to", "02:00"]), ist())
            .unwrap()
            .unwrap();
        assert!((w.duration_days() - 4.0 / 24.0).abs() < 1e-6);
    }

    #[test]
    fn cli_parses_horary() {
        let cli = Cli::try_parse_from([
            "kp", "horary", "34", "--date", "2024-02-05", "--lat", "11.02", "--lon", "-76.98",
            "--utc-offset", "-5:30", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Horary(args) => {
                assert_eq!(args.number, 34);
                assert_eq!(args.lon, Some(-76.98));
                assert_eq!(args.utc_offset.as_deref(), Some("-5:30"));
            }
            _ => panic!("expected horary"),
        }
    }
}
