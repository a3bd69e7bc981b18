//! Binary entrypoint delegating to the library `run()`.

#[tokio::main]
async fn main() {
    let code = moviequotes_cli::run().await;
    std::process::exit(code);
}
