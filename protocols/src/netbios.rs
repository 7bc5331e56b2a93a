//! NetBIOS node status (NBSTAT, RFC 1002 §4.2.17/18) over UDP 137.

use thiserror::Error;
use tracing::trace;

pub const NETBIOS_NS_PORT: u16 = 137;

const HDR_LEN: usize = 12;
const TYPE_NBSTAT: u16 = 0x0021;
const CLASS_IN: u16 = 0x0001;
const NAME_ENTRY_LEN: usize = 18;
const FLAG_GROUP: u16 = 0x8000;
const FLAG_ACTIVE: u16 = 0x0400;
/// Suffix of the workstation service name.
const SUFFIX_WORKSTATION: u8 = 0x00;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("packet truncated at offset {0}")]
    Truncated(usize),
    #[error("unexpected transaction id {found:#06x}, expected {expected:#06x}")]
    IdMismatch { expected: u16, found: u16 },
    #[error("not a node status response (type {0:#06x})")]
    NotNodeStatus(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub name: String,
    pub suffix: u8,
    pub group: bool,
    pub active: bool,
}

/// Wildcard (`*`) node status request.
pub fn create_status_request(id: u16) -> Vec<u8> {
    let mut packet = Vec::with_capacity(HDR_LEN + 34 + 4);
    packet.extend_from_slice(&id.to_be_bytes());
    packet.extend_from_slice(&[0x00, 0x00]); // flags: query
    packet.extend_from_slice(&1u16.to_be_bytes()); // QDCOUNT
    packet.extend_from_slice(&[0; 6]); // AN, NS, AR

    packet.push(32);
    packet.extend_from_slice(&encode_name(b"*"));
    packet.push(0);

    packet.extend_from_slice(&TYPE_NBSTAT.to_be_bytes());
    packet.extend_from_slice(&CLASS_IN.to_be_bytes());
    packet
}

/// Decodes every name entry of a node status response.
pub fn parse_status_response(data: &[u8], expected_id: u16) -> Result<Vec<NameEntry>, DecodeError> {
    let found = read_u16(data, 0)?;
    if found != expected_id {
        return Err(DecodeError::IdMismatch { expected: expected_id, found });
    }

    let mut cursor = skip_name(data, HDR_LEN)?;
    let rtype = read_u16(data, cursor)?;
    if rtype != TYPE_NBSTAT {
        return Err(DecodeError::NotNodeStatus(rtype));
    }
    // type, class, ttl, rdlength
    cursor += 2 + 2 + 4 + 2;

    let count = *data.get(cursor).ok_or(DecodeError::Truncated(cursor))? as usize;
    cursor += 1;
    trace!("Node status response lists {count} names");

    (0..count)
        .map(|idx| {
            let start = cursor + idx * NAME_ENTRY_LEN;
            let entry = data
                .get(start..start + NAME_ENTRY_LEN)
                .ok_or(DecodeError::Truncated(start))?;
            let flags = u16::from_be_bytes([entry[16], entry[17]]);
            Ok(NameEntry {
                name: String::from_utf8_lossy(&entry[..15])
                    .trim_end_matches([' ', '\0'])
                    .to_string(),
                suffix: entry[15],
                group: flags & FLAG_GROUP != 0,
                active: flags & FLAG_ACTIVE != 0,
            })
        })
        .collect()
}

/// The machine name: first active, unique workstation entry, lowercased.
pub fn workstation_name(entries: &[NameEntry]) -> Option<String> {
    entries
        .iter()
        .find(|e| e.suffix == SUFFIX_WORKSTATION && !e.group && e.active && !e.name.is_empty())
        .map(|e| e.name.to_ascii_lowercase())
}

/// First-level encoding: name padded to 16 bytes, each nibble mapped onto 'A'..'P'.
fn encode_name(name: &[u8]) -> Vec<u8> {
    let mut padded = [0u8; 16];
    let len = name.len().min(16);
    padded[..len].copy_from_slice(&name[..len]);

    padded
        .iter()
        .flat_map(|byte| [b'A' + (byte >> 4), b'A' + (byte & 0x0F)])
        .collect()
}

fn skip_name(data: &[u8], mut cursor: usize) -> Result<usize, DecodeError> {
    loop {
        let len = *data.get(cursor).ok_or(DecodeError::Truncated(cursor))?;
        match len {
            0 => return Ok(cursor + 1),
            l if l & 0xC0 == 0xC0 => return Ok(cursor + 2),
            l => cursor += 1 + l as usize,
        }
    }
}

fn read_u16(data: &[u8], at: usize) -> Result<u16, DecodeError> {
    data.get(at..at + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or(DecodeError::Truncated(at))
}
