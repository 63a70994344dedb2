fn main() {
    if let Err(err) = tutorhub_lib::run() {
        eprintln!("tutorhub: {err:#}");
        std::process::exit(1);
    }
}
