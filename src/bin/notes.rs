use clap::Parser;
use notes_api_rust::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    notes_api_rust::init_tracing();

    let cli = Cli::parse();

    // `run` has already reported the error in the chosen output format
    if let Err(e) = notes_api_rust::cli::run(cli).await {
        if let Ok("true") | Ok("1") = std::env::var("CLI_VERBOSE").as_deref() {
            eprintln!("{e:?}");
        }
        std::process::exit(1);
    }

    Ok(())
}
