fn main() {
    if let Err(err) = fotomover::run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
