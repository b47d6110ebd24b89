//! Integration tests for encode → decode round trips.

use bitvec::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rustybpsk::params::{default_preamble, PipelineParams};
use rustybpsk::util::bits::{ascii_from_bits, bits_from_ascii, random_bits};
use rustybpsk::{decode_frame, encode_frame, PipelineError};

/// The 14-bit generator key used by the long-key scenarios.
fn long_crc_key() -> BitVec<u8, Msb0> {
    [1u8, 1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1]
        .iter()
        .map(|&b| b != 0)
        .collect()
}

#[test]
fn hello_world_scenario_decodes_bit_for_bit() {
    // 12 ASCII characters, preamble length 60, CRC key length 14, 8
    // samples per symbol, roll-off 0.5, filter span 8 symbols
    let payload = bits_from_ascii("Hello World!");
    assert_eq!(payload.len(), 96);

    let params = PipelineParams {
        payload_bits: 96,
        crc_key: long_crc_key(),
        ..Default::default()
    };
    assert_eq!(params.preamble.len(), 60);
    assert_eq!(params.sps, 8);
    assert_eq!(params.alpha, 0.5);
    assert_eq!(params.span, 8);

    let waveform = encode_frame(&payload, &params).unwrap();
    let report = decode_frame(&waveform, &params).unwrap();

    assert!(report.crc_ok, "CRC reported a failure on a clean channel");
    let errors = (0..payload.len())
        .filter(|&i| report.payload[i] != payload[i])
        .count();
    assert_eq!(errors, 0, "{} bit errors on a clean channel", errors);
    assert_eq!(ascii_from_bits(&report.payload), "Hello World!");
}

#[test]
fn random_payloads_round_trip_with_default_session() {
    let params = PipelineParams::default();
    for seed in [1u64, 17, 4096] {
        let mut rng = StdRng::seed_from_u64(seed);
        let payload = random_bits(&mut rng, params.payload_bits);

        let waveform = encode_frame(&payload, &params).unwrap();
        let report = decode_frame(&waveform, &params).unwrap();

        assert!(report.crc_ok, "seed {}: CRC failed", seed);
        assert_eq!(report.payload, payload, "seed {}: payload mismatch", seed);
    }
}

#[test]
fn codeword_structure_is_payload_then_parity() {
    let params = PipelineParams {
        payload_bits: 96,
        crc_key: long_crc_key(),
        ..Default::default()
    };
    let payload = bits_from_ascii("Hello World!");

    let waveform = encode_frame(&payload, &params).unwrap();
    let report = decode_frame(&waveform, &params).unwrap();

    assert_eq!(report.bits.len(), 96 + 14 - 1);
    assert_eq!(report.bits[..96].to_bitvec(), payload);
}

#[test]
fn empty_payload_session_is_rejected() {
    let params = PipelineParams {
        payload_bits: 0,
        ..Default::default()
    };
    let empty: BitVec<u8, Msb0> = BitVec::new();
    assert!(matches!(
        encode_frame(&empty, &params),
        Err(PipelineError::InvalidConfig { .. })
    ));
}

#[test]
fn decoder_needs_the_matching_preamble_length() {
    // decoding with a longer preamble than was transmitted must not panic;
    // it either reports sync loss or comes back with a broken CRC
    let params = PipelineParams {
        payload_bits: 64,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(9);
    let payload = random_bits(&mut rng, 64);
    let waveform = encode_frame(&payload, &params).unwrap();

    let mut other = params.clone();
    let mut doubled = default_preamble();
    doubled.extend_from_bitslice(&default_preamble());
    other.preamble = doubled;

    match decode_frame(&waveform, &other) {
        Ok(report) => assert!(!report.crc_ok || report.payload != payload),
        Err(PipelineError::SyncLost { .. }) => {}
        Err(other) => panic!("unexpected error kind: {}", other),
    }
}

#[test]
fn short_payload_sessions_round_trip() {
    let params = PipelineParams {
        payload_bits: 8,
        ..Default::default()
    };
    let payload = bits_from_ascii("K");

    let waveform = encode_frame(&payload, &params).unwrap();
    let report = decode_frame(&waveform, &params).unwrap();

    assert!(report.crc_ok);
    assert_eq!(ascii_from_bits(&report.payload), "K");
}
