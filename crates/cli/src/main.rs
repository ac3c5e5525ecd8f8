fn main() {
    if let Err(e) = pagebundle_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
