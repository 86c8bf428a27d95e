use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io;
use std::path::Path;

// Use modules from the library
use vget::core::config::{Aria2Options, DownloadOptions, ExtractOptions, NetworkOptions};
use vget::core::download::create_downloader;
use vget::core::extract::YtDlpExtractor;
use vget::core::{aggregate_targets, resolve_cookie, run_batch, validation, RunConfig, YtDlpLocator};
use vget::ui;

fn main() {
    let matches = build_cli().get_matches();

    match run(&matches) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            ui::prompts::error(&format!("Error: {:#}", err));
            std::process::exit(1);
        }
    }
}

fn build_cli() -> Command {
    Command::new("vget")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A fast and simple batch media downloader")
        .arg(
            Arg::new("url")
                .help("Target URLs to download")
                .num_args(0..)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Debug mode")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Minimum outputs")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .help("Information only, no transfer")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Print extracted JSON data instead of downloading")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("cookie")
                .short('c')
                .long("cookie")
                .value_name("COOKIE")
                .help("Cookie string, or path to a file containing one")
        )
        .arg(
            Arg::new("playlist")
                .short('p')
                .long("playlist")
                .help("Download the whole playlist")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("user-agent")
                .short('u')
                .long("user-agent")
                .value_name("UA")
                .help("Use the specified User-Agent")
        )
        .arg(
            Arg::new("refer")
                .short('r')
                .long("refer")
                .value_name("URL")
                .help("Use the specified Referrer")
        )
        .arg(
            Arg::new("stream-format")
                .short('f')
                .long("stream-format")
                .value_name("FORMAT")
                .help("Select a specific stream/format to download")
        )
        .arg(
            Arg::new("file")
                .short('F')
                .long("file")
                .value_name("PATH")
                .help("Read additional target URLs from a file, one per line")
        )
        .arg(
            Arg::new("output-path")
                .short('o')
                .long("output-path")
                .value_name("DIR")
                .help("Specify the output path")
        )
        .arg(
            Arg::new("output-name")
                .short('O')
                .long("output-name")
                .value_name("NAME")
                .help("Specify the output file name")
        )
        .arg(
            Arg::new("file-name-length")
                .long("file-name-length")
                .value_name("N")
                .help("The maximum length of a file name, 0 means unlimited")
                .value_parser(clap::value_parser!(u32))
                .default_value("255")
        )
        .arg(
            Arg::new("caption")
                .short('C')
                .long("caption")
                .help("Download captions")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("start")
                .long("start")
                .value_name("N")
                .help("Starting item of a playlist or file input (1-based)")
                .value_parser(clap::value_parser!(u32))
                .default_value("1")
        )
        .arg(
            Arg::new("end")
                .long("end")
                .value_name("N")
                .help("Ending item of a playlist or file input, 0 means no bound")
                .value_parser(clap::value_parser!(u32))
                .default_value("0")
        )
        .arg(
            Arg::new("items")
                .long("items")
                .value_name("SPEC")
                .help("Wanted items from a file or playlist, e.g. 1,5,6,8-10")
        )
        .arg(
            Arg::new("multi-thread")
                .short('m')
                .long("multi-thread")
                .help("Multiple threads to download a single item")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("retry")
                .long("retry")
                .value_name("N")
                .help("How many times to retry when a download fails")
                .value_parser(clap::value_parser!(u32))
                .default_value("10")
        )
        .arg(
            Arg::new("chunk-size")
                .long("chunk-size")
                .value_name("MB")
                .help("HTTP chunk size for downloading (in MB)")
                .value_parser(clap::value_parser!(u32))
                .default_value("1")
        )
        .arg(
            Arg::new("thread")
                .short('n')
                .long("thread")
                .value_name("N")
                .help("Number of download threads (multi-part items only)")
                .value_parser(clap::value_parser!(u32))
                .default_value("10")
        )
        .arg(
            Arg::new("aria2")
                .long("aria2")
                .help("Use aria2 RPC to download")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("aria2-token")
                .long("aria2-token")
                .value_name("TOKEN")
                .help("aria2 RPC secret token")
        )
        .arg(
            Arg::new("aria2-addr")
                .long("aria2-addr")
                .value_name("ADDR")
                .help("aria2 RPC address")
                .default_value("localhost:6800")
        )
        .arg(
            Arg::new("aria2-method")
                .long("aria2-method")
                .value_name("METHOD")
                .help("aria2 RPC method (http or https)")
                .default_value("http")
        )
        .arg(
            Arg::new("video-password")
                .long("video-password")
                .value_name("PASSWORD")
                .help("Password for password-protected videos")
        )
        .arg(
            Arg::new("episode-title-only")
                .long("episode-title-only")
                .help("File names of playlist episodes don't include the playlist title")
                .action(ArgAction::SetTrue)
        )
}

fn run(matches: &ArgMatches) -> Result<i32> {
    let debug = matches.get_flag("debug");
    let silent = matches.get_flag("silent");
    vget::init_logging(debug, silent);

    // Resolve the work list first: no targets means nothing else should run.
    let cli_targets: Vec<String> = matches
        .get_many::<String>("url")
        .map(|urls| urls.cloned().collect())
        .unwrap_or_default();
    let file = matches.get_one::<String>("file");
    let items = matches.get_one::<String>("items");
    let start = *matches.get_one::<u32>("start").unwrap() as usize;
    let end = *matches.get_one::<u32>("end").unwrap() as usize;

    let targets = aggregate_targets(
        &cli_targets,
        file.map(Path::new),
        items.map(String::as_str),
        start,
        end,
    )?;

    // The cookie is shared network identity: resolve it before any target.
    let cookie = resolve_cookie(flag_str(matches, "cookie"))?;

    if let Some(name) = matches.get_one::<String>("output-name") {
        validation::validate_output_name(name)
            .with_context(|| format!("Invalid output name: {}", name))?;
    }

    let cfg = build_run_config(matches, cookie);

    let mut locator = YtDlpLocator::new()?;
    let binary = locator.ensure()?;

    let extractor = YtDlpExtractor::new(binary.clone());
    let downloader = create_downloader(&cfg, binary);

    let verdict = run_batch(
        &targets,
        &cfg,
        &extractor,
        downloader.as_ref(),
        &mut io::stdout(),
    )?;

    Ok(verdict.exit_code())
}

/// Copy parsed flags into the immutable per-run configuration snapshot.
fn build_run_config(matches: &ArgMatches, cookie: String) -> RunConfig {
    RunConfig {
        network: NetworkOptions {
            cookie,
            user_agent: flag_str(matches, "user-agent").to_string(),
            referer: flag_str(matches, "refer").to_string(),
            retries: *matches.get_one::<u32>("retry").unwrap(),
            debug: matches.get_flag("debug"),
            silent: matches.get_flag("silent"),
        },
        extraction: ExtractOptions {
            playlist: matches.get_flag("playlist"),
            items: flag_str(matches, "items").to_string(),
            item_start: *matches.get_one::<u32>("start").unwrap() as usize,
            item_end: *matches.get_one::<u32>("end").unwrap() as usize,
            episode_title_only: matches.get_flag("episode-title-only"),
            video_password: flag_str(matches, "video-password").to_string(),
        },
        download: DownloadOptions {
            info_only: matches.get_flag("info"),
            stream_format: flag_str(matches, "stream-format").to_string(),
            output_path: flag_str(matches, "output-path").to_string(),
            output_name: flag_str(matches, "output-name").to_string(),
            file_name_length: *matches.get_one::<u32>("file-name-length").unwrap(),
            caption: matches.get_flag("caption"),
            multi_thread: matches.get_flag("multi-thread"),
            thread_count: *matches.get_one::<u32>("thread").unwrap(),
            retries: *matches.get_one::<u32>("retry").unwrap(),
            chunk_size_mb: *matches.get_one::<u32>("chunk-size").unwrap(),
            aria2: Aria2Options {
                enabled: matches.get_flag("aria2"),
                token: flag_str(matches, "aria2-token").to_string(),
                addr: matches.get_one::<String>("aria2-addr").unwrap().clone(),
                method: matches.get_one::<String>("aria2-method").unwrap().clone(),
            },
        },
        json_output: matches.get_flag("json"),
    }
}

fn flag_str<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches.get_one::<String>(name).map(String::as_str).unwrap_or("")
}
