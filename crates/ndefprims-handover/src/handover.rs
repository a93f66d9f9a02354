use bytes::{Bytes, BytesMut};
use ndefprims_message::{decode_message, encode_message_into, Record, Tnf};
use tracing::debug;

use crate::carrier::{
    AlternativeCarrier, BluetoothOob, CarrierPowerState, MacAddress, BLUETOOTH_OOB_MIME,
    DEFAULT_CARRIER_REFERENCE, RTD_ALTERNATIVE_CARRIER,
};
use crate::error::{HandoverError, Result};

/// Well-known type of a Handover Request record.
pub const RTD_HANDOVER_REQUEST: &[u8] = b"Hr";
/// Well-known type of a Handover Select record.
pub const RTD_HANDOVER_SELECT: &[u8] = b"Hs";
/// Well-known type of a Collision Resolution record.
pub const RTD_COLLISION_RESOLUTION: &[u8] = b"cr";

/// Which side of the negotiation a handover message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandoverKind {
    Request,
    Select,
}

impl HandoverKind {
    pub fn record_type(self) -> &'static [u8] {
        match self {
            HandoverKind::Request => RTD_HANDOVER_REQUEST,
            HandoverKind::Select => RTD_HANDOVER_SELECT,
        }
    }

    fn from_record_type(record_type: &[u8]) -> Option<Self> {
        match record_type {
            RTD_HANDOVER_REQUEST => Some(HandoverKind::Request),
            RTD_HANDOVER_SELECT => Some(HandoverKind::Select),
            _ => None,
        }
    }
}

/// Handover Request offering a single Bluetooth carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverRequest {
    pub address: MacAddress,
    pub power_state: CarrierPowerState,
    /// Random value used to settle simultaneous requests.
    pub collision_number: u16,
}

impl HandoverRequest {
    pub fn new(address: MacAddress, power_state: CarrierPowerState, collision_number: u16) -> Self {
        Self {
            address,
            power_state,
            collision_number,
        }
    }

    /// One `Hr` record whose payload is `[cr, ac, bluetooth-oob]`.
    pub fn to_records(&self) -> Result<Vec<Record>> {
        compose(
            HandoverKind::Request,
            Some(self.collision_number),
            self.address,
            self.power_state,
        )
    }
}

/// Handover Select answering with a single Bluetooth carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverSelect {
    pub address: MacAddress,
    pub power_state: CarrierPowerState,
}

impl HandoverSelect {
    pub fn new(address: MacAddress, power_state: CarrierPowerState) -> Self {
        Self {
            address,
            power_state,
        }
    }

    /// One `Hs` record whose payload is `[ac, bluetooth-oob]`.
    pub fn to_records(&self) -> Result<Vec<Record>> {
        compose(HandoverKind::Select, None, self.address, self.power_state)
    }
}

/// Build a Handover Request for a Bluetooth carrier.
///
/// Only the low 16 bits of `collision_number` are carried.
pub fn encode_handover_request(mac: &str, cps: u8, collision_number: u32) -> Result<Vec<Record>> {
    let address = mac.parse::<MacAddress>()?;
    let power_state = CarrierPowerState::try_from(cps)?;
    HandoverRequest::new(address, power_state, collision_number as u16).to_records()
}

/// Build a Handover Select for a Bluetooth carrier.
pub fn encode_handover_select(mac: &str, cps: u8) -> Result<Vec<Record>> {
    let address = mac.parse::<MacAddress>()?;
    let power_state = CarrierPowerState::try_from(cps)?;
    HandoverSelect::new(address, power_state).to_records()
}

fn compose(
    kind: HandoverKind,
    collision_number: Option<u16>,
    address: MacAddress,
    power_state: CarrierPowerState,
) -> Result<Vec<Record>> {
    let mut inner = Vec::with_capacity(3);
    if let Some(collision_number) = collision_number {
        inner.push(Record::well_known(
            RTD_COLLISION_RESOLUTION,
            Bytes::copy_from_slice(&collision_number.to_be_bytes()),
        ));
    }
    inner.push(AlternativeCarrier::new(power_state, DEFAULT_CARRIER_REFERENCE).to_record()?);
    inner.push(BluetoothOob::new(address).to_record(DEFAULT_CARRIER_REFERENCE)?);

    let mut payload = BytesMut::new();
    encode_message_into(&inner, &mut payload)?;

    debug!(
        kind = ?kind,
        inner_records = inner.len(),
        payload_len = payload.len(),
        "composed handover message"
    );
    Ok(vec![Record::well_known(kind.record_type(), payload.freeze())])
}

/// Handover message recovered from an `Hr`/`Hs` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverMessage {
    pub kind: HandoverKind,
    /// Present on requests that negotiate collision resolution.
    pub collision_number: Option<u16>,
    pub carriers: Vec<AlternativeCarrier>,
    /// Carrier configuration records, referenced by id from `carriers`.
    pub configurations: Vec<Record>,
}

impl HandoverMessage {
    /// Decode the nested message carried in an `Hr` or `Hs` record.
    pub fn from_record(record: &Record) -> Result<Self> {
        let kind = match record.tnf {
            Tnf::WellKnown => HandoverKind::from_record_type(&record.record_type),
            _ => None,
        }
        .ok_or_else(|| {
            HandoverError::MalformedHandover(format!(
                "record type {:?} is not a handover record",
                String::from_utf8_lossy(&record.record_type)
            ))
        })?;

        let mut message = Self {
            kind,
            collision_number: None,
            carriers: Vec::new(),
            configurations: Vec::new(),
        };

        for inner in decode_message(record.payload.clone())? {
            if inner.is_well_known(RTD_COLLISION_RESOLUTION) {
                let value: [u8; 2] = inner.payload.as_ref().try_into().map_err(|_| {
                    HandoverError::MalformedHandover(format!(
                        "collision resolution payload is {} bytes, expected 2",
                        inner.payload.len()
                    ))
                })?;
                message.collision_number = Some(u16::from_be_bytes(value));
            } else if inner.is_well_known(RTD_ALTERNATIVE_CARRIER) {
                message
                    .carriers
                    .push(AlternativeCarrier::from_payload(&inner.payload)?);
            } else {
                message.configurations.push(inner);
            }
        }

        Ok(message)
    }

    /// The configuration record an alternative carrier points at.
    pub fn configuration_for(&self, carrier: &AlternativeCarrier) -> Option<&Record> {
        self.configurations
            .iter()
            .find(|record| record.id == carrier.carrier_reference)
    }

    /// The first Bluetooth OOB carrier, with its power state.
    pub fn bluetooth_carrier(&self) -> Result<Option<(CarrierPowerState, BluetoothOob)>> {
        for carrier in &self.carriers {
            let Some(record) = self.configuration_for(carrier) else {
                continue;
            };
            if record.tnf == Tnf::MimeMedia && record.record_type.as_ref() == BLUETOOTH_OOB_MIME {
                return Ok(Some((carrier.power_state, BluetoothOob::from_record(record)?)));
            }
        }
        Ok(None)
    }
}

/// Decode a complete outer message whose first record is `Hr` or `Hs`.
pub fn decode_handover(buf: impl Into<Bytes>) -> Result<HandoverMessage> {
    let records = decode_message(buf)?;
    let first = records.first().ok_or_else(|| {
        HandoverError::MalformedHandover("message contains no records".to_string())
    })?;
    HandoverMessage::from_record(first)
}
