use super::{document_name, product, spec_number, SPECS};

#[test]
fn test_spec_number_from_archive_names() {
    assert_eq!(spec_number("33117-j20").as_deref(), Some("33.117"));
    assert_eq!(spec_number("33.512").as_deref(), Some("33.512"));
    assert_eq!(spec_number("TS 33.537 - AKMA").as_deref(), Some("33.537"));
    assert_eq!(spec_number("notes"), None);
    assert_eq!(spec_number("1234567"), None);
}

#[test]
fn test_document_name() {
    assert_eq!(document_name("33117-j20", "3GPP TS"), "3GPP TS 33.117");
    assert_eq!(document_name("33117-j20", ""), "33.117");
    assert_eq!(document_name("draft", "3GPP TS"), "draft");
}

#[test]
fn test_product_lookup() {
    assert_eq!(product("33.117"), Some("General Requirements"));
    assert_eq!(product("33.537"), Some("AKMA Anchor Function (AAnF)"));
    assert_eq!(product("33.999"), None);
}

#[test]
fn test_catalog_numbers_are_well_formed() {
    for (number, _) in SPECS {
        assert_eq!(spec_number(number).as_deref(), Some(*number));
    }
}
