mod command;
mod episode;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
