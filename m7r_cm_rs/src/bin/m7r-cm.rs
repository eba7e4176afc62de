use m7r_cm::cli::entrypoint::{install_panic_hook, main_entry};

fn main() {
    install_panic_hook();
    std::process::exit(main_entry());
}
