use masterclass::{error::run_with_error_handler, run};

#[tokio::main]
async fn main() {
    run_with_error_handler(run).await;
}
