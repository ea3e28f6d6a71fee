fn main() {
    if let Err(err) = sitediet::cli::run() {
        sitediet::ui::eprintln_error(&err);
        std::process::exit(sitediet::exit::exit_code(&err));
    }
}
