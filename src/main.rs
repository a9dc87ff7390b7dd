#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vitalcare_lib::run().await
}
