// Phone number parsing and validation. Numbers are held in E.164 form; the
// invariant is that re-serializing a parsed number reproduces the exact
// string it was parsed from, so anything failing that is rejected up front.

use crate::countries;
use crate::error::{Error, Result};

/// A validated international-format phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    e164: String,
    region_code: &'static str,
    dialing_code: u16,
    significant: String,
}

impl PhoneNumber {
    /// Parse a number in international format (`+<dialing code><digits>`).
    ///
    /// E.164 allows at most 15 digits; fewer than 7 cannot carry both a
    /// dialing code and a subscriber number.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidPhoneNumber(input.to_string());
        let digits = input.strip_prefix('+').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if digits.len() < 7 || digits.len() > 15 {
            return Err(invalid());
        }
        let country = countries::by_dialing_prefix(digits).ok_or_else(invalid)?;
        // Italian numbers keep the trunk 0 in E.164, so a leading 0 here is
        // legitimate; only an empty remainder is rejected.
        let significant = &digits[country.dialing_code.to_string().len()..];
        if significant.is_empty() {
            return Err(invalid());
        }
        Ok(PhoneNumber {
            e164: input.to_string(),
            region_code: country.iso,
            dialing_code: country.dialing_code,
            significant: significant.to_string(),
        })
    }

    /// Parse a number that may be in national format, using `region` for the
    /// dialing code. International input (leading `+`) is parsed as-is.
    /// Punctuation commonly found in national notation is tolerated; a
    /// leading trunk `0` is dropped.
    pub fn parse_with_region(input: &str, region: &str) -> Result<Self> {
        if input.starts_with('+') {
            return Self::parse(input);
        }
        let invalid = || Error::InvalidPhoneNumber(input.to_string());
        if !input
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'))
        {
            return Err(invalid());
        }
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        let national = digits.trim_start_matches('0');
        let country = countries::by_iso(region).ok_or_else(invalid)?;
        let e164 = format!("+{}{}", country.dialing_code, national);
        let parsed = Self::parse(&e164).map_err(|_| invalid())?;
        Ok(parsed)
    }

    /// The number in international format, exactly as parsed.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// ISO region code, e.g. `IN`.
    pub fn region_code(&self) -> &'static str {
        self.region_code
    }

    /// International dialing code, e.g. `91`.
    pub fn dialing_code(&self) -> u16 {
        self.dialing_code
    }

    /// National-number digits with the dialing code stripped; the canonical
    /// query key for lookups.
    pub fn significant(&self) -> &str {
        &self.significant
    }
}

/// An OTP is exactly six ASCII digits, nothing else.
pub fn is_valid_otp(otp: &str) -> bool {
    otp.len() == 6 && otp.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_to_the_exact_input() {
        for input in ["+919912345678", "+14155552671", "+442071838750"] {
            let number = PhoneNumber::parse(input).unwrap();
            assert_eq!(number.e164(), input);
        }
    }

    #[test]
    fn splits_dialing_code_and_significant_digits() {
        let number = PhoneNumber::parse("+919912345678").unwrap();
        assert_eq!(number.region_code(), "IN");
        assert_eq!(number.dialing_code(), 91);
        assert_eq!(number.significant(), "9912345678");

        let number = PhoneNumber::parse("+14155552671").unwrap();
        assert_eq!(number.region_code(), "US");
        assert_eq!(number.significant(), "4155552671");
    }

    #[test]
    fn keeps_leading_zero_national_digits() {
        let number = PhoneNumber::parse("+390612345678").unwrap();
        assert_eq!(number.region_code(), "IT");
        assert_eq!(number.dialing_code(), 39);
        assert_eq!(number.significant(), "0612345678");
        assert_eq!(number.e164(), "+390612345678");
    }

    #[test]
    fn covers_less_common_dialing_codes() {
        let number = PhoneNumber::parse("+22961234567").unwrap();
        assert_eq!(number.region_code(), "BJ");
        assert_eq!(number.significant(), "61234567");

        let number = PhoneNumber::parse("+67712345").unwrap();
        assert_eq!(number.region_code(), "SB");
    }

    #[test]
    fn rejects_structurally_invalid_input() {
        for input in [
            "919912345678",      // missing +
            "+91 9912345678",    // embedded space
            "+91abc4567890",     // letters
            "+0912345678",       // no dialing code starts with 0
            "+1234",             // too short
            "+1234567890123456", // 16 digits
            "+",
            "",
        ] {
            let err = PhoneNumber::parse(input).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPhoneNumber(_)),
                "expected InvalidPhoneNumber for {input:?}"
            );
        }
    }

    #[test]
    fn national_format_resolves_against_region() {
        let number = PhoneNumber::parse_with_region("9912345678", "IN").unwrap();
        assert_eq!(number.e164(), "+919912345678");

        let number = PhoneNumber::parse_with_region("(415) 555-2671", "US").unwrap();
        assert_eq!(number.e164(), "+14155552671");

        // trunk zero is dropped
        let number = PhoneNumber::parse_with_region("09912345678", "IN").unwrap();
        assert_eq!(number.significant(), "9912345678");
    }

    #[test]
    fn national_format_rejects_letters_and_unknown_regions() {
        assert!(PhoneNumber::parse_with_region("99123x5678", "IN").is_err());
        assert!(PhoneNumber::parse_with_region("9912345678", "XX").is_err());
    }

    #[test]
    fn international_input_bypasses_the_region_hint() {
        let number = PhoneNumber::parse_with_region("+919912345678", "US").unwrap();
        assert_eq!(number.region_code(), "IN");
    }

    #[test]
    fn otp_must_be_exactly_six_digits() {
        assert!(is_valid_otp("123456"));
        assert!(is_valid_otp("000000"));
        for bad in ["12345", "1234567", "abcdef", "12345a", "12 456", ""] {
            assert!(!is_valid_otp(bad), "expected rejection for {bad:?}");
        }
    }
}
