#[tokio::main]
async fn main() {
    planora_backend::run().await;
}
