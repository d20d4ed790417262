mod command;
mod layout;
mod plot_style;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
