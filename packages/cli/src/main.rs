use clap::Parser;

use dotjson_cli::{Args, Output};

fn main() {
    env_logger::init();

    let args = Args::parse();

    match dotjson_cli::run(&args) {
        Ok(Output::Exists(exists)) => {
            println!("{}", exists);
            if !exists {
                std::process::exit(1);
            }
        }
        Ok(Output::Value(value)) => match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
