use std::io::Read;

use structopt::StructOpt;

use mailsend::{MailRequest, MailSender};

mod error;

use error::Error;

/// Exit code when the message could not be sent
const SEND_FAILED: i32 = 1;

/// Exit code when the parameter record is unusable
const INVALID_PARAMS: i32 = 2;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mailsend-action",
    about = "Sends one HTML email over SMTP with STARTTLS."
)]
struct Opt {
    /// Path to the config file
    #[structopt(short, long)]
    config: Option<String>,

    /// Parameter record as JSON. Read from stdin if omitted.
    params: Option<String>,
}

/// Parse the parameter record, reading it from `input` if it was not
/// given on the command line.
fn read_request(params: Option<String>, mut input: impl Read) -> Result<MailRequest, Error> {
    let raw = match params {
        Some(params) => params,
        None => {
            let mut params = String::new();
            input.read_to_string(&mut params)?;
            params
        }
    };

    Ok(MailRequest::from_json(&raw)?)
}

fn main() {
    // Init logger
    env_logger::builder().format_timestamp_micros().init();

    let opt = Opt::from_args();

    let settings = match mailsend::config::load_config(opt.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Default::default()
        }
    };

    let request = match read_request(opt.params, std::io::stdin()) {
        Ok(request) => request,
        Err(e) => {
            log::error!("{}", e);
            println!("{}", e.to_json());
            std::process::exit(INVALID_PARAMS);
        }
    };

    log::debug!("Request: {:?}", request);

    let sender = MailSender::from_settings(&settings.smtp);
    let result = sender.send(&request);

    println!("{}", result.to_json());

    if !result.is_success() {
        std::process::exit(SEND_FAILED);
    }
}
