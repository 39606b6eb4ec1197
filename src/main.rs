use std::process::ExitCode;

use bhash_decoder::{
    mempool::MempoolClient, report::to_json, scanner, settings::Settings, ScanReport,
};
use clap::{ArgGroup, Parser};
use log::error;

const CONFIG_FILE: &str = "Settings.toml";

/// Decode BHASH envelopes from Bitcoin OP_RETURN outputs.
#[derive(Parser, Debug)]
#[command(name = "bhash-decoder")]
#[command(group(ArgGroup::new("input").required(true).args(["txid", "hex", "payload"])))]
struct Args {
    /// Settings file used when fetching by txid
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,
    /// Print JSON instead of the text listing
    #[arg(long)]
    json: bool,
    /// Fetch the transaction from the configured block explorer
    #[arg(long)]
    txid: Option<String>,
    /// Full raw transaction hex
    #[arg(long)]
    hex: Option<String>,
    /// Bare OP_RETURN payload hex
    #[arg(long)]
    payload: Option<String>,
}

fn run(args: Args) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(payload) = args.payload {
        let record = scanner::decode_payload_hex(payload.trim())?;
        return Ok(if args.json {
            to_json(&record)?
        } else {
            record.to_string()
        });
    }

    let report = match (args.hex, args.txid) {
        (Some(tx_hex), _) => scanner::scan_transaction_hex(tx_hex.trim())?,
        (None, Some(txid)) => {
            let settings = Settings::from_toml(&args.config)?;
            let tx_hex = MempoolClient::new(&settings)?.fetch_tx_hex(&txid)?;
            scanner::scan_transaction_hex(&tx_hex)?
        }
        (None, None) => return Err("no input given".into()),
    };
    render(&report, args.json)
}

fn render(report: &ScanReport, json: bool) -> Result<String, Box<dyn std::error::Error>> {
    if json {
        return Ok(to_json(report)?);
    }
    Ok(report.to_string())
}

fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();

    match run(args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Parsing failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
