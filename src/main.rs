use std::process::ExitCode;

use time::format_description::well_known::Rfc3339;
use tracing::{error, info, span, Level};
use tracing_subscriber::EnvFilter;

mod adapters;
mod client;
mod config;
mod model;
mod util;

fn command() -> clap::Command {
    let expires = clap::Arg::new("EXPIRES")
        .long("expires")
        .help("URL validity window in seconds")
        .value_parser(clap::value_parser!(u64));

    clap::Command::new("objecturl")
        .version(clap::crate_version!())
        .about("Presigned URLs, listing and deletion for a single S3 bucket")
        .subcommand_required(true)
        .arg(clap::Arg::new("BUCKET").long("bucket").global(true))
        .arg(clap::Arg::new("REGION").long("region").global(true))
        .arg(clap::Arg::new("ENDPOINT_URL").long("endpoint-url").global(true))
        .subcommand(
            clap::Command::new("download-url")
                .about("Presign a GET for an object")
                .arg(clap::Arg::new("KEY").required(true).index(1))
                .arg(expires.clone()),
        )
        .subcommand(
            clap::Command::new("upload-url")
                .about("Presign a PUT under the upload prefix")
                .arg(clap::Arg::new("FILENAME").required(true).index(1))
                .arg(clap::Arg::new("CONTENT_TYPE").required(true).index(2))
                .arg(expires),
        )
        .subcommand(
            clap::Command::new("list")
                .about("List one page of objects")
                .arg(clap::Arg::new("PREFIX").index(1).default_value("/")),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete an object under the upload prefix")
                .arg(clap::Arg::new("FILENAME").required(true).index(1)),
        )
}

fn load_config(matches: &clap::ArgMatches) -> Result<config::StorageConfig, model::error::StoreError> {
    let mut config = config::StorageConfig::from_env()?;

    if let Some(bucket) = matches.get_one::<String>("BUCKET") {
        config = config.with_bucket(bucket);
    }
    if let Some(region) = matches.get_one::<String>("REGION") {
        config = config.with_region(region);
    }
    if let Some(endpoint) = matches.get_one::<String>("ENDPOINT_URL") {
        config = config.with_endpoint_url(endpoint);
    }

    Ok(config)
}

async fn run(
    storage: &client::ObjectStorageClient,
    matches: &clap::ArgMatches,
) -> Result<(), model::error::StoreError> {
    match matches.subcommand() {
        Some(("download-url", sub)) => {
            let key = sub.get_one::<String>("KEY").map(String::as_str).unwrap_or_default();
            let url = storage
                .generate_download_url(key, sub.get_one::<u64>("EXPIRES").copied())
                .await?;
            info!(method=%url.method, expiry_seconds=url.expiry_seconds, "presigned");
            println!("{}", url);
        }
        Some(("upload-url", sub)) => {
            let filename = sub.get_one::<String>("FILENAME").map(String::as_str).unwrap_or_default();
            let content_type = sub
                .get_one::<String>("CONTENT_TYPE")
                .map(String::as_str)
                .unwrap_or_default();
            let url = storage
                .generate_upload_url(filename, content_type, sub.get_one::<u64>("EXPIRES").copied())
                .await?;
            info!(method=%url.method, expiry_seconds=url.expiry_seconds, "presigned");
            println!("{}", url);
            if let Some(content_type) = url.header("content-type") {
                println!("content-type: {}", content_type);
            }
        }
        Some(("list", sub)) => {
            let prefix = sub.get_one::<String>("PREFIX").map(String::as_str).unwrap_or("/");
            let listing = storage.list_objects(prefix).await?;
            if listing.is_empty() {
                info!(bucket=storage.bucket(), prefix=prefix, "no objects found");
            }
            for o in &listing.objects {
                let modified = o
                    .last_modified
                    .and_then(|t| t.format(&Rfc3339).ok())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}\t{}\t{}", modified, o.size, o.key);
            }
            if listing.is_truncated {
                info!("listing truncated, more pages available");
            }
        }
        Some(("delete", sub)) => {
            let filename = sub.get_one::<String>("FILENAME").map(String::as_str).unwrap_or_default();
            let deleted = storage.delete_object(filename).await?;
            info!(
                key=%deleted.key,
                delete_marker=?deleted.delete_marker,
                version_id=?deleted.version_id,
                "deleted"
            );
            println!("deleted: {}", deleted.key);
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let span = span!(Level::INFO, "main", context="main");
    let _e = span.enter();
    info!("called");

    let matches = command().get_matches();

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(err) => {
            error!(error_message=%err, error_group="configuration");
            return ExitCode::FAILURE;
        }
    };

    let storage = match client::ObjectStorageClient::connect(&config).await {
        Ok(storage) => storage,
        Err(err) => {
            error!(error_message=%err, error_group="configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(&storage, &matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error_message=%err, error_group="operation");
            ExitCode::FAILURE
        }
    }
}
