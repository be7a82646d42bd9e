use std::borrow::Cow;

/// The long name of a side code as it appears in a pairing (e.g. `OG`).
/// Codes we do not recognise are returned as they are.
pub fn name_of_side(code: &str) -> Cow<'_, str> {
    match code.to_ascii_uppercase().as_str() {
        "OG" => "Opening Government",
        "OO" => "Opening Opposition",
        "CG" => "Closing Government",
        "CO" => "Closing Opposition",
        "GOV" => "Government",
        "OPP" => "Opposition",
        "PROP" => "Proposition",
        "AFF" => "Affirmative",
        "NEG" => "Negative",
        _ => return Cow::Borrowed(code),
    }
    .into()
}

#[cfg(test)]
#[test]
fn test_side_names() {
    assert_eq!(name_of_side("OG"), "Opening Government");
    assert_eq!(name_of_side("co"), "Closing Opposition");
    assert_eq!(name_of_side("AFF"), "Affirmative");
    assert_eq!(name_of_side("Bench 3"), "Bench 3");
}
