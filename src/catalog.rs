//! The 3GPP security assurance specifications (SCAS) this tool is pointed at.
//!
//! 3GPP archives name their files after the bare spec number (`33117-j20.docx` for TS 33.117
//! release 19), so the catalog is also where file names are turned back into document names.

use regex::Regex;
use std::sync::LazyLock;

/// Known specification numbers and the network product each one covers.
pub const SPECS: &[(&str, &str)] = &[
    ("33.116", "MME"),
    ("33.117", "General Requirements"),
    ("33.216", "eNB"),
    ("33.226", "IMS"),
    ("33.250", "PGW"),
    ("33.326", "NSSAAF"),
    ("33.511", "gNodeB"),
    ("33.512", "AMF"),
    ("33.513", "UPF"),
    ("33.514", "UDM"),
    ("33.515", "SMF"),
    ("33.516", "AUSF"),
    ("33.517", "SEPP"),
    ("33.518", "NRF"),
    ("33.519", "NEF"),
    ("33.520", "N3IWF"),
    ("33.521", "NWDAF"),
    ("33.522", "SCP"),
    ("33.523", "Split gNB"),
    ("33.526", "Management Function"),
    ("33.527", "Virtualized network products"),
    ("33.528", "PCF"),
    ("33.530", "UDR"),
    ("33.537", "AKMA Anchor Function (AAnF)"),
];

static SPEC_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])(\d{2})\.?(\d{3})(?:[^0-9]|$)").expect("static regex must compile")
});

#[must_use]
/// Product covered by a specification number such as `33.117`.
pub fn product(number: &str) -> Option<&'static str> {
    SPECS
        .iter()
        .find(|(known, _)| *known == number)
        .map(|(_, product)| *product)
}

#[must_use]
/// Find a dotted specification number (`33.117`) in a file stem such as `33117-j20`.
pub fn spec_number(stem: &str) -> Option<String> {
    let caps = SPEC_NUMBER.captures(stem)?;
    Some(format!("{}.{}", &caps[1], &caps[2]))
}

#[must_use]
/// Document name for a file stem: `<prefix> <number>` when a spec number is present, the stem
/// itself otherwise.
pub fn document_name(stem: &str, prefix: &str) -> String {
    match spec_number(stem) {
        Some(number) if prefix.is_empty() => number,
        Some(number) => format!("{prefix} {number}"),
        None => stem.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/catalog.rs"]
mod tests;
