fn main() -> anyhow::Result<()> {
    roster::runner::run()
}
