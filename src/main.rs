fn main() {
    if let Err(err) = crane_listings::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
