use clap::{arg, crate_authors, crate_version, value_parser, App, ArgAction};
use env_logger::Env;
use log::debug;
use std::env;
use std::process::ExitCode;

use sendgram::{read_payload, send_message, Target};

fn get_args() -> (bool, String, String) {
    let matches = App::new("sendgram")
        .version(crate_version!())
        .author(crate_authors!(", "))
        .about("sends one UDP datagram with a text payload to a host and port")
        .arg(arg!(verbose: -v --verbose "log the send at debug level").action(ArgAction::SetTrue))
        .arg(
            arg!(target: -t --target <HOSTNAME> "destination host to send to \
                 (the port can also be specified after a colon, default 8000). This value can \
                 also be set via the SENDGRAM_TARGET environment variable.")
                .value_parser(value_parser!(String))
                .required(false)
                .default_value(&env::var("SENDGRAM_TARGET").unwrap_or("localhost:8000".to_string())),
        )
        .arg(
            arg!(message: -m --message <TEXT> "the text payload of the datagram. If the value starts with \
                 an '@' character, it's assumed to be a filename from which the payload should be read. The \
                 message can also be set in the environment variable SENDGRAM_MESSAGE.")
                .value_parser(value_parser!(String))
                .required(false)
                .default_value(&env::var("SENDGRAM_MESSAGE").unwrap_or("ping".to_string())),
        )
        .get_matches();

    let verbose = *matches.get_one::<bool>("verbose").expect("defaulted by clap");

    let target = matches
        .get_one::<String>("target")
        .expect("defaulted by clap")
        .to_string();

    let message = matches
        .get_one::<String>("message")
        .expect("defaulted by clap")
        .to_string();

    (verbose, target, message)
}

fn main() -> ExitCode {
    let (verbose, target_str, message_arg) = get_args();

    let env = Env::default()
        .filter_or("SENDGRAM_LOG_LEVEL", if verbose { "debug" } else { "info" })
        .write_style_or("SENDGRAM_LOG_STYLE", "always");
    env_logger::init_from_env(env);

    let target = match Target::parse(&target_str) {
        Ok(t) => t,
        Err(error) => {
            eprintln!("bad target: {}", error);
            return ExitCode::from(2);
        }
    };

    let msg = match read_payload(&message_arg) {
        Ok(m) => m,
        Err(error) => {
            eprintln!("couldn't read payload {:?}: {}", message_arg, error);
            return ExitCode::from(3);
        }
    };

    debug!("send({:?}) → {}", msg, target);

    match send_message(&target, &msg) {
        Ok(amt) => {
            debug!("sent {} bytes", amt);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("send to {} failed: {}", target, error);
            ExitCode::from(4)
        }
    }
}
