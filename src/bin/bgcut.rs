//! Binary entry point for the bgcut CLI

fn main() {
    if let Err(e) = bgcut::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
