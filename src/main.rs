use bankpromo::config::{self, ScrapeConfig};
use bankpromo::fetch::HttpFetcher;
use bankpromo::model::{Bank, BankPromo};
use bankpromo::pipeline;
use bankpromo::throttle::Throttle;

use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};

const CONFIG_PATH: &str = "config.json";

const ALL_BANKS: [Bank; 4] = [Bank::Bdo, Bank::Bpi, Bank::EastWest, Bank::ChinaBank];

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    // Bank names on the command line select which pipelines run; no
    // arguments means all of them.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let banks: Vec<Bank> = if args.is_empty() {
        ALL_BANKS.to_vec()
    } else {
        let mut banks = Vec::new();
        for arg in &args {
            match Bank::from_arg(arg) {
                Some(bank) => banks.push(bank),
                None => {
                    error!(
                        "unknown bank `{arg}`; expected one of bdo, bpi, eastwest, chinabank"
                    );
                    return ExitCode::FAILURE;
                }
            }
        }
        banks
    };

    let config: ScrapeConfig = if Path::new(CONFIG_PATH).exists() {
        match config::load_config(CONFIG_PATH) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("config load error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        ScrapeConfig::default()
    };

    let fetcher = HttpFetcher::new();
    let throttle = Throttle::polite();

    let mut all_promos: Vec<BankPromo> = Vec::new();
    let mut failed = false;
    for bank in banks {
        match pipeline::run(&fetcher, bank, &config, &throttle) {
            Ok(mut promos) => {
                info!(%bank, count = promos.len(), "pipeline finished");
                all_promos.append(&mut promos);
            }
            Err(e) => {
                error!(%bank, error = %e, "pipeline failed");
                failed = true;
            }
        }
    }

    match serde_json::to_string_pretty(&all_promos) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("serialization error: {e}");
            return ExitCode::FAILURE;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
