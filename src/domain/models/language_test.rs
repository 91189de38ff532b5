use super::Language;

#[test]
fn it_parses_lowercase_names() {
    assert_eq!(Language::parse("spanish"), Some(Language::Spanish));
    assert_eq!(Language::parse("italian"), Some(Language::Italian));
}

#[test]
fn it_rejects_free_text() {
    assert_eq!(Language::parse("Spanish"), None);
    assert_eq!(Language::parse("klingon"), None);
}

#[test]
fn it_cycles_and_wraps() {
    assert_eq!(Language::English.next(), Language::Spanish);
    assert_eq!(Language::Italian.next(), Language::English);
}

#[test]
fn it_displays_as_wire_value() {
    assert_eq!(Language::German.to_string(), "german");
}
