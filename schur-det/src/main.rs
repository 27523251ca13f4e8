use std::env;
use std::fs::File;
use std::io::BufWriter;

use schur_det::{Config, Mode};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "schur-det".to_string());

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", Config::usage(&program));
            std::process::exit(1);
        }
    };

    match config.mode {
        Mode::Run { input, output } => {
            info!(input = %input.display(), "reading instances");
            let instances = schur_det::read_instances(&input).await?;
            let records = schur_det::run_batch(instances).await;

            let file = BufWriter::new(File::create(&output)?);
            schur_det::write_report(file, &records, chrono::Utc::now())?;
            info!(output = %output.display(), records = records.len(), "report written");
        }
        Mode::Generate { n, workers, output } => {
            let instance = schur_det::generate_instance(n, workers, &mut rand::thread_rng())?;
            let file = BufWriter::new(File::create(&output)?);
            schur_det::write_instance(file, &instance)?;
            info!(n, workers, output = %output.display(), "instance written");
        }
    }

    Ok(())
}
