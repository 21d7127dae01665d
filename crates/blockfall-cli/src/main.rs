mod command;
mod logging;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
