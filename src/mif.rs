/* Rendering of Memory Initialization Files */
use super::*;
use std::fmt;

// Example, two words:
// WIDTH=32;
// DEPTH=4096;
//
// ADDRESS_RADIX=HEX;
// DATA_RADIX=HEX;
//
// CONTENT BEGIN
// 	000  :   DEADBEEF;
// 	001  :   00000013;
// 	[002..FFF]  :   00000000;
// END;

const HEADER: &str = "WIDTH=32;
DEPTH=4096;

ADDRESS_RADIX=HEX;
DATA_RADIX=HEX;

CONTENT BEGIN
";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MifDocument {
    words: Vec<String>,
}

impl MifDocument {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_string())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    // Start of the zero-filled catch-all range
    pub fn next_address(&self) -> usize {
        self.words.len()
    }

    pub fn fits(&self) -> bool {
        self.words.len() <= DEPTH
    }
}

impl<S: AsRef<str>> FromIterator<S> for MifDocument {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for MifDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEADER)?;
        for (addr, word) in self.words.iter().enumerate() {
            // Entries are upper-cased whole, value included
            let entry = format!("\t{addr:03x}  :   {word};\n");
            f.write_str(&entry.to_uppercase())?;
        }
        writeln!(
            f,
            "\t[{:03X}..{:03X}]  :   00000000;",
            self.next_address(),
            LAST_ADDRESS
        )?;
        writeln!(f, "END;")
    }
}

#[test]
fn header_matches_geometry() {
    assert!(HEADER.starts_with(&format!("WIDTH={WIDTH};\nDEPTH={DEPTH};\n")));
    assert_eq!(format!("{LAST_ADDRESS:03X}"), "FFF");
}

#[test]
fn single_word() {
    let mif: MifDocument = ["deadbeef"].into_iter().collect();
    let text = mif.to_string();
    assert!(text.starts_with(HEADER));
    assert!(text.ends_with(
        "CONTENT BEGIN\n\t000  :   DEADBEEF;\n\t[001..FFF]  :   00000000;\nEND;\n"
    ));
}

#[test]
fn addresses_are_sequential() {
    let mif = MifDocument::new(["00000001", "0000000a", "ffffffff"]);
    let body = &mif.to_string()[HEADER.len()..];
    assert_eq!(
        body,
        "\t000  :   00000001;
\t001  :   0000000A;
\t002  :   FFFFFFFF;
\t[003..FFF]  :   00000000;
END;
"
    );
}

#[test]
fn empty_image_zeroes_everything() {
    let mif = MifDocument::new(Vec::<String>::new());
    assert!(mif.is_empty());
    assert_eq!(
        mif.to_string(),
        format!("{HEADER}\t[000..FFF]  :   00000000;\nEND;\n")
    );
}

#[test]
fn words_are_trimmed_not_validated() {
    let mif = MifDocument::new(["  12ab  ", "\tnot hex\r", ""]);
    assert_eq!(mif.words(), ["12ab", "not hex", ""]);
    let text = mif.to_string();
    assert!(text.contains("\t000  :   12AB;\n"));
    assert!(text.contains("\t001  :   NOT HEX;\n"));
    assert!(text.contains("\t002  :   ;\n"));
    assert!(text.contains("\t[003..FFF]"));
}

#[test]
fn addresses_past_three_digits() {
    let mif = MifDocument::new(vec!["0"; 0x1001]);
    assert!(!mif.fits());
    let text = mif.to_string();
    assert!(text.contains("\tFFF  :   0;\n\t1000  :   0;\n"));
    assert!(text.contains("\t[1001..FFF]  :   00000000;\n"));
}

#[test]
fn entry_count() {
    for n in [1, 2, 17, 256] {
        let mif = MifDocument::new((0..n).map(|i| format!("{i:08x}")));
        let text = mif.to_string();
        let entries = text.lines().filter(|l| l.starts_with('\t')).count();
        assert_eq!(entries, n + 1);
        let last = text.lines().rev().nth(1).unwrap();
        assert_eq!(last, format!("\t[{n:03X}..FFF]  :   00000000;"));
    }
}
