//! CancerRAG command line
//!
//! `cancerrag <GENE> <ALTERATION> [--tumor <TYPE>]` prints the annotation as pretty JSON.

use cancerrag::{
	init_tracing, load_config, load_config_from, log_service_info, log_service_shutdown,
	serde_json, AnnotatorBuilder,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "cancerrag", version, about = "Annotate a cancer variant with source evidence and an LLM verdict")]
struct Cli {
	/// Gene symbol, e.g. EGFR
	gene: String,

	/// Protein alteration, e.g. L858R
	alteration: String,

	/// Tumor type, e.g. "Lung Cancer"
	#[arg(short, long)]
	tumor: Option<String>,

	/// Configuration file without extension (defaults to config/config)
	#[arg(short, long)]
	config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();

	// Load .env file if it exists
	dotenvy::dotenv().ok();

	let settings = match &cli.config {
		Some(path) => load_config_from(path)?,
		None => load_config()?,
	};

	init_tracing(&settings.logging).map_err(|e| e.to_string())?;
	log_service_info(&settings);

	let annotator = AnnotatorBuilder::new().with_settings(settings).build()?;
	let result = annotator
		.annotate(&cli.gene, &cli.alteration, cli.tumor.as_deref())
		.await;

	println!("{}", serde_json::to_string_pretty(&result)?);

	log_service_shutdown();
	Ok(())
}
