//! Debug dumps of intermediate sequences.
//!
//! Plain text, one value per line: real sequences as decimals, complex
//! sequences as `<real>+<imag>j`. Not part of the wire format; the files
//! exist to be diffed against reference traces and plotted.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::buffer::ComplexBuffer;

/// Write a real sequence, one decimal per line.
pub fn write_real(path: &Path, values: &[f64]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{:.6}", value)?;
    }
    out.flush()
}

/// Write a complex sequence as `<real>+<imag>j` per line.
///
/// Negative imaginary parts carry their own sign, so `1.0-0.5j` rather than
/// `1.0+-0.5j`.
pub fn write_complex(path: &Path, buffer: &ComplexBuffer) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (i, sample) in buffer.samples().iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        if sample.im < 0.0 {
            write!(out, "{:.6}{:.6}j", sample.re, sample.im)?;
        } else {
            write!(out, "{:.6}+{:.6}j", sample.re, sample.im)?;
        }
    }
    out.flush()
}
