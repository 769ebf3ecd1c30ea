use std::process;

fn main() {
    if let Err(err) = anveshak::cli::main() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
