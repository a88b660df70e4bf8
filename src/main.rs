fn main() {
    if let Err(error) = planeview::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
