#[tokio::main]
async fn main() {
    if let Err(err) = loandesk::run().await {
        eprintln!("loandesk error: {err}");
        std::process::exit(1);
    }
}
