#[tokio::main]
async fn main() -> anyhow::Result<()> {
    opsdesk::cli::run().await
}
