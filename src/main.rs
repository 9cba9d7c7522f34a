use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = filebucket::cli::parse();
    app::run(args)
}
