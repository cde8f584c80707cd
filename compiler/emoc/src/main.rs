//! Emo command-line interface.

fn main() {
    emoc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let code = match emoc::dispatch(&args) {
        Ok(status) => status.exit_code(),
        Err(error) => {
            eprintln!("{error}");
            1
        }
    };
    std::process::exit(code);
}
