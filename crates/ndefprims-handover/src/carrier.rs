use std::fmt;
use std::str::FromStr;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use ndefprims_message::{Record, Tnf};

use crate::error::{HandoverError, Result};

/// Well-known type of an Alternative Carrier record.
pub const RTD_ALTERNATIVE_CARRIER: &[u8] = b"ac";

/// MIME type of a Bluetooth out-of-band carrier configuration record.
pub const BLUETOOTH_OOB_MIME: &[u8] = b"application/vnd.bluetooth.ep.oob";

/// Carrier data reference linking an `ac` record to its configuration record id.
pub const DEFAULT_CARRIER_REFERENCE: &[u8] = b"0";

const MAC_LEN: usize = 6;
const OOB_LENGTH_FIELD: usize = 2;
const CPS_MASK: u8 = 0x03;

/// Carrier Power State of an alternative carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CarrierPowerState {
    Inactive = 0,
    Active = 1,
    Activating = 2,
    Unknown = 3,
}

impl CarrierPowerState {
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            CarrierPowerState::Inactive => "inactive",
            CarrierPowerState::Active => "active",
            CarrierPowerState::Activating => "activating",
            CarrierPowerState::Unknown => "unknown",
        }
    }
}

impl TryFrom<u8> for CarrierPowerState {
    type Error = HandoverError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CarrierPowerState::Inactive),
            1 => Ok(CarrierPowerState::Active),
            2 => Ok(CarrierPowerState::Activating),
            3 => Ok(CarrierPowerState::Unknown),
            other => Err(HandoverError::InvalidCarrierPowerState(other)),
        }
    }
}

impl fmt::Display for CarrierPowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bluetooth device address, stored most-significant octet first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; MAC_LEN]);

impl MacAddress {
    pub fn new(octets: [u8; MAC_LEN]) -> Self {
        Self(octets)
    }

    /// Octets in display order.
    pub fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }

    /// Octets in Bluetooth wire order (least-significant first).
    pub fn wire_octets(&self) -> [u8; MAC_LEN] {
        let mut octets = self.0;
        octets.reverse();
        octets
    }

    fn from_wire(wire: &[u8]) -> Self {
        let mut octets = [0u8; MAC_LEN];
        octets.copy_from_slice(wire);
        octets.reverse();
        Self(octets)
    }
}

impl FromStr for MacAddress {
    type Err = HandoverError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || HandoverError::InvalidMacAddress(s.to_string());

        let mut octets = [0u8; MAC_LEN];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Alternative Carrier record contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeCarrier {
    pub power_state: CarrierPowerState,
    /// Id of the carrier configuration record this entry points at.
    pub carrier_reference: Bytes,
    pub auxiliary_references: Vec<Bytes>,
}

impl AlternativeCarrier {
    pub fn new(power_state: CarrierPowerState, carrier_reference: impl Into<Bytes>) -> Self {
        Self {
            power_state,
            carrier_reference: carrier_reference.into(),
            auxiliary_references: Vec::new(),
        }
    }

    /// Payload layout:
    /// `cps | ref_len | ref | aux_count | (aux_len | aux)*`
    pub fn to_payload(&self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        buf.put_u8(self.power_state.bits());
        put_reference(&mut buf, &self.carrier_reference)?;
        let aux_count = u8::try_from(self.auxiliary_references.len()).map_err(|_| {
            HandoverError::MalformedHandover("too many auxiliary data references".to_string())
        })?;
        buf.put_u8(aux_count);
        for aux in &self.auxiliary_references {
            put_reference(&mut buf, aux)?;
        }
        Ok(buf.freeze())
    }

    pub fn from_payload(payload: &Bytes) -> Result<Self> {
        let mut buf = payload.clone();
        let cps = take_u8(&mut buf, "carrier power state")? & CPS_MASK;
        let power_state = CarrierPowerState::try_from(cps)?;
        let carrier_reference = take_reference(&mut buf)?;
        let aux_count = take_u8(&mut buf, "auxiliary reference count")?;
        let auxiliary_references = (0..aux_count)
            .map(|_| take_reference(&mut buf))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            power_state,
            carrier_reference,
            auxiliary_references,
        })
    }

    pub fn to_record(&self) -> Result<Record> {
        Ok(Record::well_known(RTD_ALTERNATIVE_CARRIER, self.to_payload()?))
    }
}

fn put_reference(buf: &mut BytesMut, reference: &[u8]) -> Result<()> {
    let len = u8::try_from(reference.len()).map_err(|_| {
        HandoverError::MalformedHandover(format!(
            "carrier reference is {} bytes, max 255",
            reference.len()
        ))
    })?;
    buf.put_u8(len);
    buf.put_slice(reference);
    Ok(())
}

fn take_u8(buf: &mut Bytes, field: &str) -> Result<u8> {
    if !buf.has_remaining() {
        return Err(HandoverError::MalformedHandover(format!(
            "alternative carrier truncated at {field}"
        )));
    }
    Ok(buf.get_u8())
}

fn take_reference(buf: &mut Bytes) -> Result<Bytes> {
    let len = usize::from(take_u8(buf, "reference length")?);
    if len > buf.remaining() {
        return Err(HandoverError::MalformedHandover(format!(
            "reference length {len} exceeds remaining {} bytes",
            buf.remaining()
        )));
    }
    Ok(buf.split_to(len))
}

/// Bluetooth out-of-band carrier configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BluetoothOob {
    pub address: MacAddress,
    /// Optional EIR fields following the address.
    pub extended: Bytes,
}

impl BluetoothOob {
    pub fn new(address: MacAddress) -> Self {
        Self {
            address,
            extended: Bytes::new(),
        }
    }

    /// Payload layout: 2-byte little-endian total length, 6-octet address in
    /// wire order, then extended fields.
    pub fn to_payload(&self) -> Result<Bytes> {
        let total = OOB_LENGTH_FIELD + MAC_LEN + self.extended.len();
        let total_field = u16::try_from(total).map_err(|_| {
            HandoverError::MalformedHandover(format!("Bluetooth OOB data is {total} bytes"))
        })?;

        let mut buf = BytesMut::with_capacity(total);
        buf.put_u16_le(total_field);
        buf.put_slice(&self.address.wire_octets());
        buf.put_slice(&self.extended);
        Ok(buf.freeze())
    }

    /// MIME record with the given carrier reference as its id.
    pub fn to_record(&self, carrier_reference: impl Into<Bytes>) -> Result<Record> {
        Ok(Record::mime(Bytes::from_static(BLUETOOTH_OOB_MIME), self.to_payload()?)
            .with_id(carrier_reference))
    }

    pub fn from_record(record: &Record) -> Result<Self> {
        if record.tnf != Tnf::MimeMedia || record.record_type.as_ref() != BLUETOOTH_OOB_MIME {
            return Err(HandoverError::MalformedHandover(
                "not a Bluetooth OOB record".to_string(),
            ));
        }

        let payload = &record.payload;
        if payload.len() < OOB_LENGTH_FIELD + MAC_LEN {
            return Err(HandoverError::MalformedHandover(format!(
                "Bluetooth OOB payload is {} bytes, need at least {}",
                payload.len(),
                OOB_LENGTH_FIELD + MAC_LEN
            )));
        }

        let declared = usize::from(u16::from_le_bytes([payload[0], payload[1]]));
        if declared < OOB_LENGTH_FIELD + MAC_LEN || declared > payload.len() {
            return Err(HandoverError::MalformedHandover(format!(
                "Bluetooth OOB length field {declared} does not match payload ({} bytes)",
                payload.len()
            )));
        }

        let address_end = OOB_LENGTH_FIELD + MAC_LEN;
        Ok(Self {
            address: MacAddress::from_wire(&payload[OOB_LENGTH_FIELD..address_end]),
            extended: payload.slice(address_end..declared),
        })
    }
}
