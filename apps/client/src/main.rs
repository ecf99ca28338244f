#[tokio::main]
async fn main() -> anyhow::Result<()> {
    verse_study::run().await
}
