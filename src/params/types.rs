//! The per-request parameter set and its external key table.

use serde::Serialize;

/// Bootstrap parameters decoded from one request.
///
/// Every field is a free-form string; absent keys stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterSet {
    /// Reconstructed request URL, `%`-escaped. Never supplied by the client.
    pub origin: String,
    pub ip1: String,
    pub ip2: String,
    pub ip3: String,
    pub encryption: String,
    pub initial_token: String,
    pub prefix: String,
    pub client_port: String,
    pub peer_port: String,
    pub directory: String,
    pub username: String,
    pub version: String,
}

/// Accessor returning the field bound to an external key.
pub type FieldSlot = fn(&mut ParameterSet) -> &mut String;

/// External form key to field mapping, walked by the decoder.
pub const FIELDS: &[(&str, FieldSlot)] = &[
    ("i1", |p| &mut p.ip1),
    ("i2", |p| &mut p.ip2),
    ("i3", |p| &mut p.ip3),
    ("e", |p| &mut p.encryption),
    ("t", |p| &mut p.initial_token),
    ("r", |p| &mut p.prefix),
    ("c", |p| &mut p.client_port),
    ("p", |p| &mut p.peer_port),
    ("d", |p| &mut p.directory),
    ("u", |p| &mut p.username),
    ("v", |p| &mut p.version),
];
