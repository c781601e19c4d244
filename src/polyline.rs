use crate::entities::Position;
use crate::error::{parse_error, Error};

// Encoded polylines carry (lat, lon) pairs, delta-encoded, scaled by 1e5.
const PRECISION: f64 = 1e5;

/// Encode a waypoint sequence as a Google-style polyline string.
pub fn encode(positions: &[Position]) -> String {
    let mut out = String::new();

    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for position in positions {
        let lat = (position.latitude * PRECISION).round() as i64;
        let lon = (position.longitude * PRECISION).round() as i64;

        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);

        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

/// Decode a polyline string back into waypoints.
pub fn decode(encoded: &str) -> Result<Vec<Position>, Error> {
    let mut positions = Vec::new();
    let mut bytes = encoded.bytes();

    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    loop {
        match decode_value(&mut bytes)? {
            Some(delta) => lat += delta,
            None => break,
        }

        let delta = decode_value(&mut bytes)?.ok_or_else(|| parse_error("dangling latitude"))?;
        lon += delta;

        positions.push(Position::new(lat as f64 / PRECISION, lon as f64 / PRECISION));
    }

    Ok(positions)
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = value << 1;
    if value < 0 {
        v = !v;
    }

    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }

    out.push((v as u8 + 63) as char);
}

fn decode_value(bytes: &mut std::str::Bytes<'_>) -> Result<Option<i64>, Error> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = match bytes.next() {
            Some(b) => b,
            None if shift == 0 => return Ok(None),
            None => return Err(parse_error("truncated chunk sequence")),
        };

        if !(63..=126).contains(&byte) {
            return Err(parse_error("byte outside polyline alphabet"));
        }

        let chunk = (byte - 63) as i64;

        // a chunk sequence that claims more bits than the accumulator holds
        // is malformed, not a bigger number
        if shift >= 64 {
            return Err(parse_error("overlong chunk sequence"));
        }

        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    if result & 1 != 0 {
        Ok(Some(!(result >> 1)))
    } else {
        Ok(Some(result >> 1))
    }
}

#[test]
fn decodes_the_reference_polyline() {
    let positions = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();

    assert_eq!(positions.len(), 3);
    assert_eq!(positions[0], Position::new(38.5, -120.2));
    assert_eq!(positions[1], Position::new(40.7, -120.95));
    assert_eq!(positions[2], Position::new(43.252, -126.453));
}

#[test]
fn encodes_the_reference_coordinates() {
    let positions = [
        Position::new(38.5, -120.2),
        Position::new(40.7, -120.95),
        Position::new(43.252, -126.453),
    ];

    assert_eq!(encode(&positions), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
}

#[test]
fn round_trip_stays_within_tolerance() {
    let positions = [
        Position::new(12.934512, 77.512345),
        Position::new(12.900001, 77.610009),
        Position::new(-33.867487, 151.206991),
        Position::new(0.0, 0.0),
    ];

    let decoded = decode(&encode(&positions)).unwrap();

    assert_eq!(decoded.len(), positions.len());
    for (original, decoded) in positions.iter().zip(decoded.iter()) {
        assert!((original.latitude - decoded.latitude).abs() <= 1e-5);
        assert!((original.longitude - decoded.longitude).abs() <= 1e-5);
    }
}

#[test]
fn empty_string_decodes_to_no_positions() {
    assert!(decode("").unwrap().is_empty());
}

#[test]
fn rejects_bytes_outside_the_alphabet() {
    assert!(decode(">invalid").is_err());
}

#[test]
fn rejects_a_dangling_latitude() {
    assert!(decode("_p~iF").is_err());
}

#[test]
fn rejects_an_overlong_chunk_sequence() {
    // every byte keeps the continuation bit set, claiming a value wider
    // than 64 bits
    assert!(decode(&"~".repeat(14)).is_err());
}
