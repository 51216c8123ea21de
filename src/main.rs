#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dashgov::cli::run_cli().await
}
