//! Binary entrypoint for fontlist-cli

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("FONTLIST_LOG", "warn"))
        .init();

    if let Err(err) = fontlist_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
