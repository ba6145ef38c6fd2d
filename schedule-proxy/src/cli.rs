use std::env;
use std::net::SocketAddr;
use std::process;

use getopts::Options;
use tokio::time::Duration;

pub const ADDRESS_ENV: &str = "SCHEDULE_PROXY_ADDR";

const DEFAULT_FEED_URL: &str = "https://gist.githubusercontent.com/Thomas-Marchand/427d44e917d26d6073378d81db84d5b2/raw/calendar_events.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub address: SocketAddr,
    pub feed_url: String,
    pub cache_ttl: Duration,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        concat!(
            "Socket address (IP and port) to listen on, falls back to $SCHEDULE_PROXY_ADDR ",
            "[Default: 127.0.0.1:8080]"
        ),
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "f",
        "feed-url",
        "URL of the JSON event feed [Default: published scraper gist]",
        "URL",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Seconds a fetched feed is reused before fetching again [Default: 300]",
        "SECONDS",
    );
    opts
}

pub fn usage() -> String {
    let opts = opts();
    opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME")))
}

/// `Ok(None)` means help was requested.
pub fn try_parse(args: Vec<String>, env_address: Option<String>) -> Result<Option<Args>, String> {
    let matches = opts().parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(None);
    }

    let address = match matches.opt_str("address").or(env_address) {
        Some(value) => value
            .parse::<SocketAddr>()
            .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?,
        None => SocketAddr::from(([127, 0, 0, 1], 8080)),
    };

    let feed_url = matches
        .opt_str("feed-url")
        .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

    let cache_ttl = matches
        .opt_get_default("cache-ttl", 300)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'cache-ttl' is invalid: {err}"))?;

    Ok(Some(Args {
        address,
        feed_url,
        cache_ttl,
    }))
}

pub fn parse(args: Vec<String>) -> Args {
    match try_parse(args, env::var(ADDRESS_ENV).ok()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", usage());
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
