//! Handover round trip: compose a Bluetooth Handover Request, put it on the
//! wire, then parse it back and recover the carrier.
//!
//! Run with:
//!   cargo run --example handover-roundtrip

use ndefprims::handover::{decode_handover, encode_handover_request, HandoverKind};
use ndefprims::message::encode_message;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records = encode_handover_request("01:02:03:04:05:06", 1, 0x1234)?;
    let wire = encode_message(&records)?;
    println!("wire ({} bytes): {}", wire.len(), hex::encode(&wire));

    let message = decode_handover(wire)?;
    assert_eq!(message.kind, HandoverKind::Request);
    println!("kind: {:?}", message.kind);
    if let Some(collision) = message.collision_number {
        println!("collision number: 0x{collision:04x}");
    }

    match message.bluetooth_carrier()? {
        Some((power_state, oob)) => {
            println!("bluetooth carrier: {} ({power_state})", oob.address);
        }
        None => println!("no bluetooth carrier"),
    }

    Ok(())
}
