use std::path::PathBuf;

use clap::Parser;
use gpt_sovits_g2p_ja::*;

/// Convert Japanese text to phonemes using a recorded frontend analysis.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with the recorded frontend output for each text segment
    #[arg(long)]
    fixture: PathBuf,

    /// Optional JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit plain phonemes without accent phrase markers
    #[arg(long)]
    no_prosody: bool,

    /// Print phoneme ids as well
    #[arg(long)]
    ids: bool,

    text: String,
}

fn main() -> Result<(), G2PError> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => G2pConfig::from_json_file(path)?,
        None => G2pConfig::default(),
    };
    if args.no_prosody {
        config.with_prosody = false;
    }

    let fixture = args.fixture.clone();
    let registry = G2pRegistry::new(config, move || {
        Ok(Box::new(RecordedFrontend::from_json_file(&fixture)?) as Box<dyn Frontend>)
    });

    let output = text_to_phonemes(&registry, &args.text, Lang::Ja)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    if args.ids {
        println!("{:?}", output.phone_ids());
    }
    Ok(())
}
