use std::time::{SystemTime, UNIX_EPOCH};

use ndefprims_handover::{encode_handover_request, encode_handover_select};
use ndefprims_message::encode_message;

use crate::cmd::HandoverCommand;
use crate::exit::{handover_error, ndef_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(command: HandoverCommand, format: OutputFormat) -> CliResult<i32> {
    let records = match command {
        HandoverCommand::Request(args) => {
            let collision = args.collision.unwrap_or_else(clock_collision_number);
            encode_handover_request(&args.mac, args.cps, collision)
        }
        HandoverCommand::Select(args) => encode_handover_select(&args.mac, args.cps),
    }
    .map_err(|err| handover_error("handover failed", err))?;

    let wire = encode_message(&records).map_err(|err| ndef_error("encode failed", err))?;
    tracing::info!(bytes = wire.len(), "composed handover message");
    print_encoded(&wire, format);
    Ok(SUCCESS)
}

fn clock_collision_number() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(0)
}
