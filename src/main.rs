#[tokio::main]
async fn main() {
    cicero::start_server().await;
}
