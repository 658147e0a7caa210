use hearth::runner;

#[tokio::main]
async fn main() {
    if let Err(e) = runner::run().await {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}
