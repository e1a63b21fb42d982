use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

const AS_PATH_AS_SET: u8 = 1;
const AS_PATH_AS_SEQUENCE: u8 = 2;
// https://datatracker.ietf.org/doc/html/rfc5065
const AS_PATH_CONFED_SEQUENCE: u8 = 3;
const AS_PATH_CONFED_SET: u8 = 4;

pub fn parse_as_path(mut input: Bytes, asn_len: AsnLength) -> Result<AsPath, ParserError> {
    let mut output = AsPath {
        segments: Vec::with_capacity(5),
    };
    while input.remaining() > 0 {
        let segment = parse_as_path_segment(&mut input, asn_len)?;
        output.append_segment(segment);
    }

    Ok(output)
}

fn parse_as_path_segment(
    input: &mut Bytes,
    asn_len: AsnLength,
) -> Result<AsPathSegment, ParserError> {
    let segment_type = input.read_u8()?;
    let count = input.read_u8()? as usize;
    let path = input.read_asns(asn_len, count)?;
    match segment_type {
        AS_PATH_AS_SET => Ok(AsPathSegment::AsSet(path)),
        AS_PATH_AS_SEQUENCE => Ok(AsPathSegment::AsSequence(path)),
        AS_PATH_CONFED_SEQUENCE => Ok(AsPathSegment::ConfedSequence(path)),
        AS_PATH_CONFED_SET => Ok(AsPathSegment::ConfedSet(path)),
        _ => Err(ParserError::ParseError(format!(
            "invalid AS path segment type: {}",
            segment_type
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_as_path_16bit() {
        let data = Bytes::from(vec![
            2, // sequence
            3, // 3 ASes in path
            0, 1, // AS1
            0, 2, // AS2
            0, 3, // AS3
            1, // set
            1, // 1 AS
            0, 4, // AS4
        ]);
        let path = parse_as_path(data, AsnLength::Bits16).unwrap();
        assert_eq!(
            path.segments,
            vec![
                AsPathSegment::AsSequence(vec![Asn::from(1), Asn::from(2), Asn::from(3)]),
                AsPathSegment::AsSet(vec![Asn::from(4)]),
            ]
        );
    }

    #[test]
    fn test_parse_as_path_32bit() {
        let data = Bytes::from(vec![
            2, 2, // sequence of 2
            0, 0, 0, 1, // AS1
            0, 6, 0x1a, 0x80, // AS400000
        ]);
        let path = parse_as_path(data, AsnLength::Bits32).unwrap();
        assert_eq!(path, AsPath::from_sequence([1, 400000]));
    }

    #[test]
    fn test_parse_as_path_errors() {
        // unknown segment type
        let data = Bytes::from(vec![9, 1, 0, 1]);
        assert!(parse_as_path(data, AsnLength::Bits16).is_err());

        // declared count larger than data
        let data = Bytes::from(vec![2, 3, 0, 1]);
        assert!(matches!(
            parse_as_path(data, AsnLength::Bits16),
            Err(ParserError::IoNotEnoughBytes(6, 2))
        ));
    }
}
