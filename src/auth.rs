use clap::{App, Arg, ArgMatches, SubCommand};
use quill_client::session::Session;
use std::io::{self, Write};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("auth")
        .about("Manage your session")
        .subcommand(
            SubCommand::with_name("login")
                .arg(
                    Arg::with_name("email")
                        .short("e")
                        .long("email")
                        .takes_value(true)
                        .help("Email address to log in with"),
                )
                .arg(
                    Arg::with_name("password")
                        .short("p")
                        .long("password")
                        .takes_value(true)
                        .help("Password (prompted when omitted)"),
                )
                .about("Log in and store the session token"),
        )
        .subcommand(SubCommand::with_name("whoami").about("Show the logged-in user"))
        .subcommand(SubCommand::with_name("logout").about("Log out and forget the local token"))
}

pub fn run<'a>(args: &ArgMatches<'a>) {
    match args.subcommand() {
        ("login", Some(x)) => login(x),
        ("whoami", _) => whoami(),
        ("logout", _) => logout(),
        _ => println!("Unknown subcommand"),
    }
}

fn login<'a>(args: &ArgMatches<'a>) {
    let email = args
        .value_of("email")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Email"));
    let password = args.value_of("password").map(String::from).unwrap_or_else(|| {
        print!("Password: ");
        io::stdout().flush().expect("Couldn't flush STDOUT");
        rpassword::read_password().expect("Couldn't read your password.")
    });

    match Session::login(&email, &password) {
        Ok(user) => println!("Logged in as {} <{}>", user.name, user.email),
        Err(e) => super::fail(e),
    }
}

fn whoami() {
    match Session::open() {
        Ok(session) => println!(
            "{} <{}> (id {})",
            session.user.name, session.user.email, session.user.id
        ),
        Err(e) => super::fail(e),
    }
}

fn logout() {
    match Session::logout() {
        Ok(()) => println!("Logged out."),
        Err(e) => super::fail(e),
    }
}
