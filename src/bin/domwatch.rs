use domwatch::app;

#[tokio::main]
async fn main() {
    let status = app::run().await;
    std::process::exit(status.code());
}
