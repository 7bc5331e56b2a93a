//! Wire codecs for the name resolution methods: unicast DNS PTR, mDNS legacy
//! unicast PTR and NetBIOS node status. Only encoding and decoding lives here;
//! sockets and timeouts belong to `lanward-core`.

pub mod dns;
pub mod mdns;
pub mod netbios;
