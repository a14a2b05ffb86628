use anyhow::Result;
use cardio_core::{api, config::Config};
use colored::*;
use std::path::Path;

fn cli<'a, 'b>() -> clap::App<'a, 'b> {
	clap::App::new("cardio")
		.version(clap::crate_version!())
		.about("Inspect and aggregate the status of the heart disease project.")
		.setting(clap::AppSettings::SubcommandRequiredElseHelp)
		.arg(
			clap::Arg::with_name("config")
				.help("the path to a config file")
				.long("config")
				.short("c")
				.takes_value(true)
				.global(true),
		)
		.subcommand(
			clap::SubCommand::with_name("snapshot")
				.about("print the full project status snapshot"),
		)
		.subcommand(
			clap::SubCommand::with_name("system")
				.about("print the deployment environment status"),
		)
		.subcommand(
			clap::SubCommand::with_name("notebooks").about("print the notebook summaries"),
		)
		.subcommand(
			clap::SubCommand::with_name("sample").about("print the first rows of the dataset"),
		)
		.subcommand(
			clap::SubCommand::with_name("predict").about("run the diagnostic test inference"),
		)
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.init();
	let matches = cli().get_matches();
	let result = run(matches);
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		error
			.chain()
			.skip(1)
			.for_each(|cause| eprintln!("  {} {}", "->".red().bold(), cause));
		std::process::exit(1);
	}
}

fn run(matches: clap::ArgMatches) -> Result<()> {
	let (subcommand, submatches) = matches.subcommand();
	let config_path = submatches
		.and_then(|submatches| submatches.value_of("config"))
		.or_else(|| matches.value_of("config"));
	let config = match config_path {
		Some(config_path) => Config::from_path(Path::new(config_path))?,
		None => Config::default(),
	};
	let json = match subcommand {
		"snapshot" => serde_json::to_string_pretty(&api::project_data(&config))?,
		"system" => serde_json::to_string_pretty(&api::system_status(&config))?,
		"notebooks" => serde_json::to_string_pretty(&api::notebook_summaries(&config))?,
		"sample" => serde_json::to_string_pretty(&api::dataset_sample(&config)?)?,
		"predict" => serde_json::to_string_pretty(&api::test_inference(&config)?)?,
		_ => unreachable!(),
	};
	println!("{}", json);
	Ok(())
}
