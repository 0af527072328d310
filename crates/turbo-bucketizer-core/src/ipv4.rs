//! Dotted-quad IPv4 parsing into 32-bit keys.

use crate::engine::Key;
use crate::error::Ipv4Error;

/// Parse `a.b.c.d` into `a<<24 | b<<16 | c<<8 | d`.
///
/// Each of the four octets must be a non-empty run of decimal digits with a
/// value in `0..=255`. Leading zeros are accepted (`010` is ten).
pub fn parse_ipv4(s: &str) -> Result<Key, Ipv4Error> {
    let mut octets = [0u32; 4];
    let mut count = 0usize;

    for token in s.split('.') {
        if count >= octets.len() {
            return Err(Ipv4Error::TooManyOctets(s.to_string()));
        }
        if token.is_empty() {
            return Err(Ipv4Error::EmptyOctet(s.to_string()));
        }
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Ipv4Error::InvalidOctet {
                octet: token.to_string(),
                input: s.to_string(),
            });
        }
        // Digits only, so the parse can fail solely on overflow.
        let value = token.parse::<u64>().unwrap_or(u64::MAX);
        if value > 255 {
            return Err(Ipv4Error::OctetOutOfRange {
                octet: token.to_string(),
                input: s.to_string(),
            });
        }
        octets[count] = value as u32;
        count += 1;
    }

    if count != octets.len() {
        return Err(Ipv4Error::WrongOctetCount(s.to_string()));
    }

    Ok((octets[0] << 24) | (octets[1] << 16) | (octets[2] << 8) | octets[3])
}

/// Render a key as a dotted quad.
#[must_use]
pub fn format_ipv4(key: Key) -> String {
    std::net::Ipv4Addr::from(key).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_addresses() {
        assert_eq!(parse_ipv4("0.0.0.0").unwrap(), 0);
        assert_eq!(parse_ipv4("127.0.0.1").unwrap(), 0x7F000001);
        assert_eq!(parse_ipv4("192.168.0.1").unwrap(), 0xC0A80001);
        assert_eq!(parse_ipv4("255.255.255.255").unwrap(), u32::MAX);
        assert_eq!(parse_ipv4("010.0.0.1").unwrap(), 0x0A000001);
    }

    #[test]
    fn rejects_wrong_octet_count() {
        assert_eq!(
            parse_ipv4("1.2.3"),
            Err(Ipv4Error::WrongOctetCount("1.2.3".to_string()))
        );
        assert_eq!(
            parse_ipv4("1.2.3.4.5"),
            Err(Ipv4Error::TooManyOctets("1.2.3.4.5".to_string()))
        );
    }

    #[test]
    fn rejects_empty_octets() {
        for input in ["", "1..2.3", "1.2.3.", ".1.2.3"] {
            assert!(
                matches!(parse_ipv4(input), Err(Ipv4Error::EmptyOctet(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_octets() {
        for input in ["a.b.c.d", "1.2.3.x", "1.2.+3.4", "1.2.3.4 "] {
            assert!(
                matches!(parse_ipv4(input), Err(Ipv4Error::InvalidOctet { .. })),
                "{input:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_octets() {
        assert_eq!(
            parse_ipv4("256.0.0.1"),
            Err(Ipv4Error::OctetOutOfRange {
                octet: "256".to_string(),
                input: "256.0.0.1".to_string(),
            })
        );
        assert!(matches!(
            parse_ipv4("1.2.3.99999999999999999999999"),
            Err(Ipv4Error::OctetOutOfRange { .. })
        ));
    }

    #[test]
    fn format_inverts_parse() {
        for input in ["0.0.0.0", "10.1.2.3", "192.168.0.1", "255.255.255.255"] {
            assert_eq!(format_ipv4(parse_ipv4(input).unwrap()), input);
        }
    }
}
