//! End-to-end loopback demo: encode a payload, push it through a simulated
//! channel, decode it, and print the bit-level scoreboard.
//!
//! Usage: `loopback [message]`
//!
//! With a message argument the payload is the ASCII bits of the message;
//! without one a random payload is generated. `RUST_LOG=rustybpsk=debug`
//! shows the per-stage diagnostics.

use std::env;

use bitvec::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rustybpsk::params::PipelineParams;
use rustybpsk::simulation::{add_channel_noise, apply_channel_offset};
use rustybpsk::tracing_init;
use rustybpsk::util::bits::{bits_from_ascii, random_bits};
use rustybpsk::{decode_frame, encode_frame};

// channel settings from the bench setup this demo reproduces
const NOISE_STD_DEV: f64 = 1.0;
const PHASE_NOISE_STRENGTH: f64 = 0.1;
const NOISE_POWER: f64 = 10.0;
const FRACTIONAL_DELAY: f64 = 0.4;
const DELAY_TAPS: usize = 21;
const FREQ_OFFSET_HZ: f64 = 61250.0;

fn display_output(sent: &BitSlice<u8, Msb0>, received: &BitSlice<u8, Msb0>) {
    let mut correct = 0usize;
    print!("Tx [{:3}]: |", sent.len());
    for bit in sent.iter() {
        print!("{}|", *bit as u8);
    }
    println!();
    print!("Rx [{:3}]: |", received.len());
    for (i, bit) in received.iter().enumerate() {
        print!("{}|", *bit as u8);
        if i < sent.len() && *bit == sent[i] {
            correct += 1;
        }
    }
    println!();
    println!(
        "Received: {} / {} bits   |   {:.1}%",
        correct,
        sent.len(),
        correct as f64 / sent.len() as f64 * 100.0
    );
}

fn main() {
    tracing_init::init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let payload: BitVec<u8, Msb0> = match args.get(1) {
        Some(message) => bits_from_ascii(message),
        None => random_bits(&mut rng, 256),
    };

    let params = PipelineParams {
        payload_bits: payload.len(),
        ..Default::default()
    };

    let waveform = match encode_frame(&payload, &params) {
        Ok(waveform) => waveform,
        Err(err) => {
            eprintln!("encode failed: {}", err);
            std::process::exit(1);
        }
    };
    println!("transmitting {} samples", waveform.len());

    let noisy = add_channel_noise(
        &mut rng,
        &waveform,
        NOISE_STD_DEV,
        PHASE_NOISE_STRENGTH,
        NOISE_POWER,
    )
    .expect("noise synthesis");
    let impaired = apply_channel_offset(
        &noisy,
        params.fs,
        FRACTIONAL_DELAY,
        DELAY_TAPS,
        FREQ_OFFSET_HZ,
    )
    .expect("channel impairment");

    match decode_frame(&impaired, &params) {
        Ok(report) => {
            println!("CRC {}", if report.crc_ok { "ok" } else { "FAILED" });
            display_output(&payload, &report.payload);
        }
        Err(err) => {
            eprintln!("decode failed: {}", err);
            std::process::exit(1);
        }
    }
}
