use clap::{Arg, Command};
use indicatif::{MultiProgress, ProgressBar};
use indicatif_log_bridge::LogWrapper;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use libgwfetch::batch::run_batch;
use libgwfetch::config::Config;
use libgwfetch::discovery::{download_all, DiscoveryClient, DownloadOutcome};
use libgwfetch::series::RemoteSource;

fn make_template_config(path: &Path) {
    let config = Config::default();
    let yaml_str = serde_yaml::to_string(&config).unwrap();
    let mut file = File::create(path).expect("Could create template config file!");
    file.write_all(yaml_str.as_bytes())
        .expect("Failed to write yaml data to file!");
}

fn main() {
    // Create a cli
    let matches = Command::new("gwfetch_cli")
        .arg_required_else_help(true)
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .subcommand(
            Command::new("discover")
                .about("Download frame files via a datafind-style discovery host")
                .arg(
                    Arg::new("ifo")
                        .long("ifo")
                        .required(true)
                        .help("Detector prefix (e.g. H)"),
                )
                .arg(
                    Arg::new("dataset")
                        .long("dataset")
                        .required(true)
                        .help("Frame dataset name (e.g. H1_GWOSC_O3a_4KHZ_R1)"),
                )
                .arg(
                    Arg::new("urltype")
                        .long("urltype")
                        .default_value("osdf")
                        .help("URL scheme to request from the discovery host"),
                )
                .arg(
                    Arg::new("host")
                        .long("host")
                        .default_value("https://datafind.gw-openscience.org")
                        .help("Discovery host"),
                ),
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Path to the configuration file"),
        )
        .get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    let pb_manager = MultiProgress::new();

    LogWrapper::new(pb_manager.clone(), logger)
        .try_init()
        .expect("Could not create logging/progress!");

    // Parse the cli
    let config_path = PathBuf::from(matches.get_one::<String>("path").expect("We require args"));

    if let Some(("new", _)) = matches.subcommand() {
        log::info!(
            "Making a template config at {}...",
            config_path.to_string_lossy()
        );

        make_template_config(&config_path);
        log::info!("Done.");
        return;
    }

    // Load our config
    log::info!("Loading config from {}...", config_path.to_string_lossy());
    let config = match Config::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    log::info!("Config successfully loaded.");
    log::info!("Channel List: {}", config.channels_path.to_string_lossy());
    log::info!("Segment List: {}", config.segments_path.to_string_lossy());
    log::info!("Archive Host: {}", config.host);
    log::info!("Manifest: {}", config.manifest_path.to_string_lossy());
    log::info!("Output Root: {}", config.output_root.to_string_lossy());
    log::info!("Fetch Delay: {} s", config.fetch_delay_secs);

    if let Some(("discover", sub_matches)) = matches.subcommand() {
        let ifo = sub_matches.get_one::<String>("ifo").expect("required");
        let dataset = sub_matches.get_one::<String>("dataset").expect("required");
        let urltype = sub_matches.get_one::<String>("urltype").expect("defaulted");
        let host = sub_matches.get_one::<String>("host").expect("defaulted");

        log::info!("Discovering frame files for {dataset} from {host}...");
        let client = DiscoveryClient::new(host);
        match download_all(&config, &client, ifo, dataset, urltype) {
            Ok(outcomes) => {
                let n_saved = outcomes
                    .iter()
                    .filter(|o| matches!(o, DownloadOutcome::Saved { .. }))
                    .count();
                log::info!(
                    "Discovery finished: {} downloaded, {} failed.",
                    n_saved,
                    outcomes.len() - n_saved
                );
                for outcome in &outcomes {
                    if let DownloadOutcome::Failed { url, cause } = outcome {
                        log::warn!("FAILED {url}: {cause}");
                    }
                }
            }
            Err(e) => log::error!("Discovery failed with error: {e}"),
        }
        log::info!("Done.");
        return;
    }

    // Setup the progress bar
    let pb = pb_manager.add(ProgressBar::new(100));
    let (tx, rx) = std::sync::mpsc::channel();
    let worker_config = config.clone();
    // Spawn the task!
    let handle = std::thread::spawn(move || {
        let source = RemoteSource::new(&worker_config.host);
        run_batch(&worker_config, &source, &tx)
    });

    loop {
        // No UI event loop here, so poll the worker about twice a second
        std::thread::sleep(std::time::Duration::from_millis(500));
        while let Ok(status) = rx.try_recv() {
            pb.set_position((status.progress * 100.0) as u64);
            pb.set_message(format!(
                "{} [{}/{}]",
                status.channel, status.pair_index, status.total_pairs
            ));
        }

        if handle.is_finished() {
            match handle.join() {
                Ok(result) => match result {
                    Ok(report) => {
                        log::info!(
                            "Successfully fetched {} series; {} pairs failed.",
                            report.n_saved(),
                            report.n_failed()
                        );
                        for failure in report.failures() {
                            log::warn!(
                                "FAILED {} {}: {}",
                                failure.channel,
                                failure.segment,
                                failure.cause
                            );
                        }
                    }
                    Err(e) => log::error!("Batch failed with error: {e}"),
                },
                Err(_) => log::error!("Failed to join fetch task!"),
            }
            break;
        }
    }

    pb.finish();

    log::info!("Done.");
}
