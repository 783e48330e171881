use anyhow::{bail, Context};
use log::{debug, warn};
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub mod mif;

pub use mif::MifDocument;

// Geometry of the target memory block. Fixed; the MIF header is written
// against these values.
pub const WIDTH: u32 = 32;
pub const DEPTH: usize = 4096;
pub const LAST_ADDRESS: usize = DEPTH - 1;

// A line ends at "\n", "\r\n" or a lone "\r". Words are not validated.
pub fn read_words(input: &Path) -> anyhow::Result<Vec<String>> {
    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let mut words = Vec::new();
    for (lineno, line) in BufReader::new(file).split(b'\n').enumerate() {
        let failed = || format!("Failed on line {} of {}", lineno + 1, input.display());
        let line = String::from_utf8(line.with_context(failed)?).with_context(failed)?;
        if line.is_empty() {
            words.push(String::new());
            continue;
        }
        // A trailing "\r" here was part of "\r\n" or ends the file
        words.extend(line.split_terminator('\r').map(|w| w.trim().to_string()));
    }
    Ok(words)
}

// First ".hex" anywhere in the path, not only the extension
pub fn mif_path(input: &Path) -> anyhow::Result<PathBuf> {
    let Some(s) = input.to_str() else {
        bail!("Path is not valid UTF-8: {}", input.display());
    };
    if !s.contains(".hex") {
        // Would otherwise write the MIF over the input
        bail!("No \".hex\" in input path {s}");
    }
    Ok(PathBuf::from(s.replacen(".hex", ".mif", 1)))
}

pub fn convert(input: &Path) -> anyhow::Result<PathBuf> {
    let output = mif_path(input)?;
    let mif: MifDocument = read_words(input)?.into_iter().collect();
    debug!(
        "{}: {} words, zero fill from {:03X}",
        input.display(),
        mif.len(),
        mif.next_address()
    );
    if !mif.fits() {
        warn!(
            "{} has {} words but the memory only holds {DEPTH}",
            input.display(),
            mif.len()
        );
    }

    let mut file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    file.write_all(mif.to_string().as_bytes())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    debug!("wrote {}", output.display());
    Ok(output)
}

#[test]
fn line_endings() {
    let dir = tempfile::tempdir().unwrap();
    let cases: [(&str, &[&str]); 7] = [
        ("aa\rbb\n", &["aa", "bb"]),
        ("aa\r\nbb\r\n", &["aa", "bb"]),
        ("aa\r\r\nbb", &["aa", "", "bb"]),
        ("aa\rbb\r", &["aa", "bb"]),
        ("\n\r\n\r", &["", "", ""]),
        ("aa\n\nbb", &["aa", "", "bb"]),
        ("", &[]),
    ];
    for (contents, expect) in cases {
        let path = dir.path().join("m.hex");
        std::fs::write(&path, contents).unwrap();
        assert_eq!(read_words(&path).unwrap(), expect, "for {contents:?}");
    }
}

#[test]
fn output_paths() {
    let cases = [
        ("mem.hex", "mem.mif"),
        ("a.hex.hex", "a.mif.hex"),
        ("firmware/prog.hex", "firmware/prog.mif"),
        ("build.hexdump/x.hex", "build.mifdump/x.hex"),
    ];
    for (input, expect) in cases {
        let output = mif_path(Path::new(input)).expect("path has .hex");
        assert_eq!(output, Path::new(expect), "for {input}");
    }
}

#[test]
fn output_path_needs_hex() {
    assert!(mif_path(Path::new("mem.bin")).is_err());
    assert!(mif_path(Path::new("mem.HEX")).is_err());
    assert!(mif_path(Path::new("")).is_err());
}

#[test]
fn missing_input_is_an_error() {
    let err = convert(Path::new("/nonexistent/dir/mem.hex")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/dir/mem.hex"), "{err:#}");
}
