// ABOUTME: Command line tool to decode PDUs read from a modem or encode text for AT+CMGS
// ABOUTME: Shows the decode, split_text and encode_submit flow end to end

use argh::FromArgs;
use modem_sms::datatypes::MessageClass;
use modem_sms::{Part, SplitOptions, SubmitOptions, decode, decode_submit, encode_submit, split_text};
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Decode or encode SMS PDUs
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Decode(DecodeArgs),
    Encode(EncodeArgs),
}

/// decode a hex PDU as returned by AT+CMGR or AT+CMGL
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct DecodeArgs {
    /// the PDU is an SMS-SUBMIT (outbox) rather than an SMS-DELIVER
    #[argh(switch, short = 's')]
    submit: bool,

    /// storage index to report (default: 0)
    #[argh(option, short = 'i', default = "0")]
    index: u32,

    /// the PDU in hex
    #[argh(positional)]
    pdu: String,
}

/// encode a message as one or more SMS-SUBMIT PDUs
#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
struct EncodeArgs {
    /// the recipient telephone number
    #[argh(option, short = 't')]
    to: String,

    /// the message to send
    #[argh(option, short = 'm')]
    message: String,

    /// service centre address (default: the SIM's)
    #[argh(option)]
    smsc: Option<String>,

    /// concatenation reference for long messages (default: 0)
    #[argh(option, short = 'r', default = "0")]
    reference: u16,

    /// validity period in minutes
    #[argh(option)]
    validity: Option<u32>,

    /// send as a flash (class 0) message
    #[argh(switch)]
    flash: bool,

    /// request a status report
    #[argh(switch)]
    status_report: bool,
}

fn print_part(part: &Part) {
    println!("index:     {}", part.index());
    println!("smsc:      {}", part.smsc().unwrap_or("(default)"));
    println!("number:    {}", part.number());
    if let Some(timestamp) = part.timestamp() {
        println!(
            "timestamp: {} ({} minutes from UTC)",
            timestamp,
            timestamp.timezone_minutes()
        );
    }
    if let Some(minutes) = part.validity() {
        println!("validity:  {minutes} minutes");
    }
    println!("coding:    {}", part.data_coding_scheme());
    if let Some(class) = part.class() {
        println!("class:     {class:?}");
    }
    if let Some(concat) = part.concat() {
        println!(
            "concat:    part {} of {} (reference {})",
            concat.sequence(),
            concat.max(),
            concat.reference()
        );
    }
    if part.encoding().is_text() {
        println!("text:      {}", part.text());
    } else {
        println!("data:      {}", hex::encode_upper(part.data()));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging {
            Level::TRACE
        } else {
            Level::WARN
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match cli_args.command {
        Command::Decode(args) => {
            let part = if args.submit {
                decode_submit(args.index, &args.pdu)?
            } else {
                decode(args.index, &args.pdu)?
            };
            print_part(&part);
        }
        Command::Encode(args) => {
            let options = SplitOptions {
                reference: args.reference,
                smsc: args.smsc,
                class: args.flash.then_some(MessageClass::Flash),
                validity: args.validity,
                encoding: None,
            };
            let submit = SubmitOptions {
                message_reference: 0,
                status_report_request: args.status_report,
            };

            for part in split_text(&args.to, &args.message, &options)? {
                let pdu = encode_submit(&part, &submit)?;
                println!("AT+CMGS={}", pdu.tpdu_len());
                println!("{}", pdu.to_hex());
            }
        }
    }

    Ok(())
}
