//! Registration codes sent over chat to bind a chat identity to a
//! participant. The code is the participant's six digit check-in barcode.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// The example code shown in the registration instructions.
const PLACEHOLDER: &str = "123456";
const CODE_LENGTH: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationCodeError {
    #[error("the message does not contain a registration code")]
    NoCode,
    #[error(
        "please replace `123456` in your message with your registration code"
    )]
    Placeholder,
    #[error(
        "please double-check your registration code: it should be six digits \
         long"
    )]
    WrongLength,
}

/// Pulls the registration code out of a chat message (or username).
///
/// Accepts either a bare code or `register <code>`, optionally prefixed
/// with `!` (or `1`, from a missed shift key). Whitespace is ignored.
pub fn parse_registration_code(
    message: &str,
) -> Result<String, RegistrationCodeError> {
    static REGISTER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[1!]?register[^\d]*(\d+)$").expect("valid regex")
    });
    static BARE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

    let message = message
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let code = if let Some(captures) = REGISTER.captures(&message) {
        captures[1].to_string()
    } else if BARE.is_match(&message) {
        message
    } else {
        return Err(RegistrationCodeError::NoCode);
    };

    if code == PLACEHOLDER {
        return Err(RegistrationCodeError::Placeholder);
    }
    if code.len() != CODE_LENGTH {
        return Err(RegistrationCodeError::WrongLength);
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_codes() {
        assert_eq!(parse_registration_code("482913").unwrap(), "482913");
        assert_eq!(
            parse_registration_code("!register 482913").unwrap(),
            "482913"
        );
        assert_eq!(
            parse_registration_code("  Register: 482 913 ").unwrap(),
            "482913"
        );
        assert_eq!(
            parse_registration_code("1register482913").unwrap(),
            "482913"
        );
    }

    #[test]
    fn rejects_bad_codes() {
        assert_eq!(
            parse_registration_code("!register 123456"),
            Err(RegistrationCodeError::Placeholder)
        );
        assert_eq!(
            parse_registration_code("48291"),
            Err(RegistrationCodeError::WrongLength)
        );
        assert_eq!(
            parse_registration_code("hello"),
            Err(RegistrationCodeError::NoCode)
        );
    }
}
