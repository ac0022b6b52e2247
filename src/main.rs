use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = sendlayer::cli::Cli::parse();

    if let Err(err) = sendlayer::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
