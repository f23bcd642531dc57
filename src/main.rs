use csvreverse::{CsvReverseError, run_csvreverse};

fn main() {
    let args_itr = std::env::args_os().skip(1);
    match run_csvreverse(args_itr) {
        Ok(summary) => println!("{summary}"),
        Err(e @ CsvReverseError::Usage) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
