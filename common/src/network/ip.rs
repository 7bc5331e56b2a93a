use std::net::{IpAddr, Ipv4Addr};

/// RFC1918 check: 10/8, 172.16/12, 192.168/16.
pub fn is_private_v4(ip: &Ipv4Addr) -> bool {
    match ip.octets() {
        [10, ..] => true,
        [172, second, ..] => (16..=31).contains(&second),
        [192, 168, ..] => true,
        _ => false,
    }
}

/// Builds the `in-addr.arpa` / `ip6.arpa` name used by PTR queries.
pub fn reverse_address_to_ptr(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}.in-addr.arpa")
        }
        IpAddr::V6(v6) => {
            let nibbles: Vec<String> = v6
                .octets()
                .iter()
                .rev()
                .flat_map(|byte| [byte & 0x0F, byte >> 4])
                .map(|nibble| format!("{nibble:x}"))
                .collect();
            format!("{}.ip6.arpa", nibbles.join("."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_ranges_are_detected() {
        assert!(is_private_v4(&Ipv4Addr::new(10, 1, 2, 3)));
        assert!(is_private_v4(&Ipv4Addr::new(172, 16, 0, 1)));
        assert!(is_private_v4(&Ipv4Addr::new(172, 31, 255, 254)));
        assert!(is_private_v4(&Ipv4Addr::new(192, 168, 0, 1)));
    }

    #[test]
    fn public_and_edge_ranges_are_rejected() {
        assert!(!is_private_v4(&Ipv4Addr::new(172, 15, 0, 1)));
        assert!(!is_private_v4(&Ipv4Addr::new(172, 32, 0, 1)));
        assert!(!is_private_v4(&Ipv4Addr::new(192, 169, 0, 1)));
        assert!(!is_private_v4(&Ipv4Addr::new(8, 8, 8, 8)));
        assert!(!is_private_v4(&Ipv4Addr::new(169, 254, 1, 1)));
    }

    #[test]
    fn ptr_name_reverses_octets() {
        let ip = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20));
        assert_eq!(reverse_address_to_ptr(&ip), "20.1.168.192.in-addr.arpa");
    }

    #[test]
    fn ptr_name_for_ipv6_uses_nibbles() {
        let ip: IpAddr = "2001:db8::1".parse().unwrap();
        let ptr = reverse_address_to_ptr(&ip);
        assert!(ptr.starts_with("1.0.0.0."));
        assert!(ptr.ends_with(".8.b.d.0.1.0.0.2.ip6.arpa"));
    }
}
