use clap::App;
use std::io::{self, prelude::*};

mod auth;
mod posts;

fn main() {
    tracing_subscriber::fmt::init();

    let mut app = App::new("Quill")
        .bin_name("quill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Admin console for your blog's publishing API.")
        .subcommand(auth::command())
        .subcommand(posts::command());
    let matches = app.clone().get_matches();

    match dotenv::dotenv() {
        Ok(path) => tracing::debug!("configuration read from {}", path.display()),
        Err(ref e) if e.not_found() => (),
        e => e.map(|_| ()).unwrap(),
    }

    match matches.subcommand() {
        ("auth", Some(args)) => auth::run(args),
        ("posts", Some(args)) => posts::run(args),
        _ => app.print_help().expect("Couldn't print help"),
    }
}

pub fn ask_for(something: &str) -> String {
    print!("{}: ", something);
    io::stdout().flush().expect("Couldn't flush STDOUT");
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Unable to read line");
    input.retain(|c| c != '\n');
    input
}

/// Every error ends the current action, nothing is retried.
pub fn fail(err: quill_client::Error) -> ! {
    eprintln!("Error: {}", err);
    if let quill_client::Error::Unauthorized = err {
        eprintln!("Run `quill auth login` first.");
    }
    std::process::exit(1);
}
