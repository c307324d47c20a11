fn main() {
    if let Err(err) = faxc_drv::run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
