use clap::Parser;
use linofeed::cli;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    if let Err(e) = cli::run(args).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
