use clap::Parser;

use kline_seq::{Cli, DatasetConfig, PrepError, prepare_dataset};

fn main() -> anyhow::Result<()> {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let config = DatasetConfig::from_cli(&args);

    // C. Run the preparation pipeline (blocking, in-memory)
    let prepared = prepare_dataset(&config)?;

    // An empty training set is a warning inside the library, but fatal here:
    // there is nothing a downstream trainer could consume.
    if prepared.train.is_empty() {
        return Err(PrepError::InsufficientData {
            rows: prepared.summary.train_rows,
            seq_len: config.seq_len,
        }
        .into());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prepared.summary)?);
    }

    Ok(())
}
