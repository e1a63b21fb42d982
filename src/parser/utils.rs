/*!
Provides IO utility functions for read bytes of different length and converting to corresponding structs.
*/
use ipnet::IpNet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::ParserError;
use crate::models::*;
use bytes::{Buf, Bytes};

impl ReadUtils for Bytes {}
impl ReadUtils for &[u8] {}

/// Bounds-checked big-endian readers on top of [Buf].
///
/// Every method checks the remaining length first and returns
/// [ParserError::IoNotEnoughBytes] instead of panicking like the raw `Buf::get_*` calls.
pub trait ReadUtils: Buf {
    #[inline]
    fn has_n_remaining(&self, n: usize) -> Result<(), ParserError> {
        if self.remaining() < n {
            Err(ParserError::IoNotEnoughBytes(n, self.remaining()))
        } else {
            Ok(())
        }
    }

    /// Check that a fixed-size field has exactly `n` bytes.
    #[inline]
    fn expect_remaining_eq(&self, n: usize, target: &'static str) -> Result<(), ParserError> {
        if self.remaining() != n {
            return Err(ParserError::ParseError(format!(
                "{} has invalid length: expected {} bytes, found {}",
                target,
                n,
                self.remaining()
            )));
        }
        Ok(())
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.has_n_remaining(1)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.has_n_remaining(2)?;
        Ok(self.get_u16())
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(4)?;
        Ok(self.get_u32())
    }

    #[inline]
    fn read_u64(&mut self) -> Result<u64, ParserError> {
        self.has_n_remaining(8)?;
        Ok(self.get_u64())
    }

    fn read_ipv4_address(&mut self) -> Result<Ipv4Addr, ParserError> {
        let addr = self.read_u32()?;
        Ok(Ipv4Addr::from(addr))
    }

    fn read_ipv6_address(&mut self) -> Result<Ipv6Addr, ParserError> {
        self.has_n_remaining(16)?;
        let buf = self.get_u128();
        Ok(Ipv6Addr::from(buf))
    }

    fn read_address(&mut self, afi: &Afi) -> Result<IpAddr, ParserError> {
        match afi {
            Afi::Ipv4 => self.read_ipv4_address().map(IpAddr::V4),
            Afi::Ipv6 => self.read_ipv6_address().map(IpAddr::V6),
        }
    }

    #[inline]
    fn read_asn(&mut self, as_length: AsnLength) -> Result<Asn, ParserError> {
        match as_length {
            AsnLength::Bits16 => self.read_u16().map(Asn::new_16bit),
            AsnLength::Bits32 => self.read_u32().map(Asn::new_32bit),
        }
    }

    fn read_asns(&mut self, as_length: AsnLength, count: usize) -> Result<Vec<Asn>, ParserError> {
        self.has_n_remaining(count * as_length.byte_len())?;
        let mut path = Vec::with_capacity(count);
        for _ in 0..count {
            path.push(self.read_asn(as_length)?);
        }
        Ok(path)
    }

    /// Read announced/withdrawn prefix.
    ///
    /// The length in bits is 1 byte, and then based on the IP version it reads different number of bytes.
    /// If the `add_path` is true, it will also first read a 4-byte path id first.
    fn read_nlri_prefix(&mut self, afi: &Afi, add_path: bool) -> Result<NetworkPrefix, ParserError> {
        let path_id = if add_path {
            Some(self.read_u32()?)
        } else {
            None
        };

        // Length in bits
        let bit_len = self.read_u8()?;
        let byte_len: usize = (bit_len as usize).div_ceil(8);
        if byte_len > afi.address_len() {
            return Err(ParserError::ParseError(format!(
                "invalid byte length for {:?} prefix. byte_len: {}, bit_len: {}",
                afi, byte_len, bit_len
            )));
        }
        self.has_n_remaining(byte_len)?;

        let addr: IpAddr = match afi {
            Afi::Ipv4 => {
                let mut buff = [0; 4];
                self.copy_to_slice(&mut buff[..byte_len]);
                IpAddr::V4(Ipv4Addr::from(buff))
            }
            Afi::Ipv6 => {
                let mut buff = [0; 16];
                self.copy_to_slice(&mut buff[..byte_len]);
                IpAddr::V6(Ipv6Addr::from(buff))
            }
        };
        let prefix = IpNet::new(addr, bit_len)?;

        Ok(NetworkPrefix::new(prefix, path_id))
    }

    fn read_n_bytes(&mut self, n_bytes: usize) -> Result<Vec<u8>, ParserError> {
        self.has_n_remaining(n_bytes)?;
        Ok(self.copy_to_bytes(n_bytes).into())
    }
}

/// Parse a list of NLRI prefixes until `input` is exhausted.
pub fn parse_nlri_list(
    mut input: Bytes,
    add_path: bool,
    afi: &Afi,
) -> Result<Vec<NetworkPrefix>, ParserError> {
    let mut prefixes = vec![];
    while input.remaining() > 0 {
        prefixes.push(input.read_nlri_prefix(afi, add_path)?);
    }
    Ok(prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_read_integers() {
        let mut data = Bytes::from_static(&[1, 0, 2, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 4]);
        assert_eq!(data.read_u8().unwrap(), 1);
        assert_eq!(data.read_u16().unwrap(), 2);
        assert_eq!(data.read_u32().unwrap(), 3);
        assert_eq!(data.read_u64().unwrap(), 4);
        assert!(matches!(
            data.read_u8(),
            Err(ParserError::IoNotEnoughBytes(1, 0))
        ));
    }

    #[test]
    fn test_read_addresses() {
        let mut data: &[u8] = &[192, 0, 2, 1];
        assert_eq!(
            data.read_address(&Afi::Ipv4).unwrap(),
            IpAddr::from_str("192.0.2.1").unwrap()
        );

        let v6 = Ipv6Addr::from_str("2001:db8::1").unwrap();
        let octets = v6.octets();
        let mut data: &[u8] = &octets;
        assert_eq!(data.read_ipv6_address().unwrap(), v6);
    }

    #[test]
    fn test_read_asns() {
        let mut data: &[u8] = &[0, 1, 0, 2];
        assert_eq!(
            data.read_asns(AsnLength::Bits16, 2).unwrap(),
            vec![Asn::new_16bit(1), Asn::new_16bit(2)]
        );
        let mut data: &[u8] = &[0, 0, 0, 1];
        assert!(data.read_asns(AsnLength::Bits32, 2).is_err());
    }

    #[test]
    fn test_parse_nlri_list() {
        let input = Bytes::from_static(&[24, 192, 0, 2, 8, 10, 0]);
        let prefixes = parse_nlri_list(input, false, &Afi::Ipv4).unwrap();
        assert_eq!(
            prefixes,
            vec![
                NetworkPrefix::from_str("192.0.2.0/24").unwrap(),
                NetworkPrefix::from_str("10.0.0.0/8").unwrap(),
                NetworkPrefix::from_str("0.0.0.0/0").unwrap(),
            ]
        );

        // 33 bits do not fit into an IPv4 address
        let input = Bytes::from_static(&[33, 1, 2, 3, 4, 5]);
        assert!(parse_nlri_list(input, false, &Afi::Ipv4).is_err());
    }

    #[test]
    fn test_read_add_path_prefix() {
        let mut data = Bytes::from_static(&[0, 0, 0, 9, 16, 10, 1]);
        let prefix = data.read_nlri_prefix(&Afi::Ipv4, true).unwrap();
        assert_eq!(prefix.path_id, Some(9));
        assert_eq!(prefix.to_string(), "10.1.0.0/16");
    }
}
