// Static country metadata. One table backs two things: resolving the dialing
// code while parsing an international number, and the `country_details()`
// accessor on lookup results.

/// Metadata for one country, resolved from the static table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryDetails {
    /// ISO 3166-1 alpha-2 region code.
    pub iso: &'static str,
    pub name: &'static str,
    /// International dialing code, without the leading `+`.
    pub dialing_code: u16,
}

// Every assigned geographic ITU dialing code, sorted by code. Where a code
// is shared (1, 7, 44, 212, 262, ...) the entry listed first is the one
// parsing resolves to. Non-geographic service codes (800, 870, 881, ...)
// are not caller numbers and are left out.
static COUNTRIES: &[(&str, &str, u16)] = &[
    ("US", "United States", 1),
    ("CA", "Canada", 1),
    ("RU", "Russia", 7),
    ("KZ", "Kazakhstan", 7),
    ("EG", "Egypt", 20),
    ("ZA", "South Africa", 27),
    ("GR", "Greece", 30),
    ("NL", "Netherlands", 31),
    ("BE", "Belgium", 32),
    ("FR", "France", 33),
    ("ES", "Spain", 34),
    ("HU", "Hungary", 36),
    ("IT", "Italy", 39),
    ("RO", "Romania", 40),
    ("CH", "Switzerland", 41),
    ("AT", "Austria", 43),
    ("GB", "United Kingdom", 44),
    ("DK", "Denmark", 45),
    ("SE", "Sweden", 46),
    ("NO", "Norway", 47),
    ("PL", "Poland", 48),
    ("DE", "Germany", 49),
    ("PE", "Peru", 51),
    ("MX", "Mexico", 52),
    ("CU", "Cuba", 53),
    ("AR", "Argentina", 54),
    ("BR", "Brazil", 55),
    ("CL", "Chile", 56),
    ("CO", "Colombia", 57),
    ("VE", "Venezuela", 58),
    ("MY", "Malaysia", 60),
    ("AU", "Australia", 61),
    ("ID", "Indonesia", 62),
    ("PH", "Philippines", 63),
    ("NZ", "New Zealand", 64),
    ("SG", "Singapore", 65),
    ("TH", "Thailand", 66),
    ("JP", "Japan", 81),
    ("KR", "South Korea", 82),
    ("VN", "Vietnam", 84),
    ("CN", "China", 86),
    ("TR", "Turkey", 90),
    ("IN", "India", 91),
    ("PK", "Pakistan", 92),
    ("AF", "Afghanistan", 93),
    ("LK", "Sri Lanka", 94),
    ("MM", "Myanmar", 95),
    ("IR", "Iran", 98),
    ("SS", "South Sudan", 211),
    ("MA", "Morocco", 212),
    ("DZ", "Algeria", 213),
    ("TN", "Tunisia", 216),
    ("LY", "Libya", 218),
    ("GM", "Gambia", 220),
    ("SN", "Senegal", 221),
    ("MR", "Mauritania", 222),
    ("ML", "Mali", 223),
    ("GN", "Guinea", 224),
    ("CI", "Ivory Coast", 225),
    ("BF", "Burkina Faso", 226),
    ("NE", "Niger", 227),
    ("TG", "Togo", 228),
    ("BJ", "Benin", 229),
    ("MU", "Mauritius", 230),
    ("LR", "Liberia", 231),
    ("SL", "Sierra Leone", 232),
    ("GH", "Ghana", 233),
    ("NG", "Nigeria", 234),
    ("TD", "Chad", 235),
    ("CF", "Central African Republic", 236),
    ("CM", "Cameroon", 237),
    ("CV", "Cape Verde", 238),
    ("ST", "Sao Tome and Principe", 239),
    ("GQ", "Equatorial Guinea", 240),
    ("GA", "Gabon", 241),
    ("CG", "Republic of the Congo", 242),
    ("CD", "DR Congo", 243),
    ("AO", "Angola", 244),
    ("GW", "Guinea-Bissau", 245),
    ("IO", "British Indian Ocean Territory", 246),
    ("SC", "Seychelles", 248),
    ("SD", "Sudan", 249),
    ("RW", "Rwanda", 250),
    ("ET", "Ethiopia", 251),
    ("SO", "Somalia", 252),
    ("DJ", "Djibouti", 253),
    ("KE", "Kenya", 254),
    ("TZ", "Tanzania", 255),
    ("UG", "Uganda", 256),
    ("BI", "Burundi", 257),
    ("MZ", "Mozambique", 258),
    ("ZM", "Zambia", 260),
    ("MG", "Madagascar", 261),
    ("RE", "Reunion", 262),
    ("ZW", "Zimbabwe", 263),
    ("NA", "Namibia", 264),
    ("MW", "Malawi", 265),
    ("LS", "Lesotho", 266),
    ("BW", "Botswana", 267),
    ("SZ", "Eswatini", 268),
    ("KM", "Comoros", 269),
    ("SH", "Saint Helena", 290),
    ("ER", "Eritrea", 291),
    ("AW", "Aruba", 297),
    ("FO", "Faroe Islands", 298),
    ("GL", "Greenland", 299),
    ("GI", "Gibraltar", 350),
    ("PT", "Portugal", 351),
    ("LU", "Luxembourg", 352),
    ("IE", "Ireland", 353),
    ("IS", "Iceland", 354),
    ("AL", "Albania", 355),
    ("MT", "Malta", 356),
    ("CY", "Cyprus", 357),
    ("FI", "Finland", 358),
    ("BG", "Bulgaria", 359),
    ("LT", "Lithuania", 370),
    ("LV", "Latvia", 371),
    ("EE", "Estonia", 372),
    ("MD", "Moldova", 373),
    ("AM", "Armenia", 374),
    ("BY", "Belarus", 375),
    ("AD", "Andorra", 376),
    ("MC", "Monaco", 377),
    ("SM", "San Marino", 378),
    ("UA", "Ukraine", 380),
    ("RS", "Serbia", 381),
    ("ME", "Montenegro", 382),
    ("XK", "Kosovo", 383),
    ("HR", "Croatia", 385),
    ("SI", "Slovenia", 386),
    ("BA", "Bosnia and Herzegovina", 387),
    ("MK", "North Macedonia", 389),
    ("CZ", "Czechia", 420),
    ("SK", "Slovakia", 421),
    ("LI", "Liechtenstein", 423),
    ("FK", "Falkland Islands", 500),
    ("BZ", "Belize", 501),
    ("GT", "Guatemala", 502),
    ("SV", "El Salvador", 503),
    ("HN", "Honduras", 504),
    ("NI", "Nicaragua", 505),
    ("CR", "Costa Rica", 506),
    ("PA", "Panama", 507),
    ("PM", "Saint Pierre and Miquelon", 508),
    ("HT", "Haiti", 509),
    ("GP", "Guadeloupe", 590),
    ("BO", "Bolivia", 591),
    ("GY", "Guyana", 592),
    ("EC", "Ecuador", 593),
    ("GF", "French Guiana", 594),
    ("PY", "Paraguay", 595),
    ("MQ", "Martinique", 596),
    ("SR", "Suriname", 597),
    ("UY", "Uruguay", 598),
    ("CW", "Curacao", 599),
    ("TL", "Timor-Leste", 670),
    ("NF", "Norfolk Island", 672),
    ("BN", "Brunei", 673),
    ("NR", "Nauru", 674),
    ("PG", "Papua New Guinea", 675),
    ("TO", "Tonga", 676),
    ("SB", "Solomon Islands", 677),
    ("VU", "Vanuatu", 678),
    ("FJ", "Fiji", 679),
    ("PW", "Palau", 680),
    ("WF", "Wallis and Futuna", 681),
    ("CK", "Cook Islands", 682),
    ("NU", "Niue", 683),
    ("WS", "Samoa", 685),
    ("KI", "Kiribati", 686),
    ("NC", "New Caledonia", 687),
    ("TV", "Tuvalu", 688),
    ("PF", "French Polynesia", 689),
    ("TK", "Tokelau", 690),
    ("FM", "Micronesia", 691),
    ("MH", "Marshall Islands", 692),
    ("KP", "North Korea", 850),
    ("HK", "Hong Kong", 852),
    ("MO", "Macau", 853),
    ("KH", "Cambodia", 855),
    ("LA", "Laos", 856),
    ("BD", "Bangladesh", 880),
    ("TW", "Taiwan", 886),
    ("MV", "Maldives", 960),
    ("LB", "Lebanon", 961),
    ("JO", "Jordan", 962),
    ("SY", "Syria", 963),
    ("IQ", "Iraq", 964),
    ("KW", "Kuwait", 965),
    ("SA", "Saudi Arabia", 966),
    ("YE", "Yemen", 967),
    ("OM", "Oman", 968),
    ("PS", "Palestine", 970),
    ("AE", "United Arab Emirates", 971),
    ("IL", "Israel", 972),
    ("BH", "Bahrain", 973),
    ("QA", "Qatar", 974),
    ("BT", "Bhutan", 975),
    ("MN", "Mongolia", 976),
    ("NP", "Nepal", 977),
    ("TJ", "Tajikistan", 992),
    ("TM", "Turkmenistan", 993),
    ("AZ", "Azerbaijan", 994),
    ("GE", "Georgia", 995),
    ("KG", "Kyrgyzstan", 996),
    ("UZ", "Uzbekistan", 998),
];

fn details((iso, name, dialing_code): (&'static str, &'static str, u16)) -> CountryDetails {
    CountryDetails {
        iso,
        name,
        dialing_code,
    }
}

/// Look a country up by its ISO region code. Absent entries yield `None`.
pub fn by_iso(iso: &str) -> Option<CountryDetails> {
    COUNTRIES
        .iter()
        .find(|(code, _, _)| *code == iso)
        .copied()
        .map(details)
}

/// Resolve the dialing code at the start of `digits` (an international number
/// with the `+` already stripped). Longest code wins: `351...` is Portugal,
/// never a one-digit match.
pub fn by_dialing_prefix(digits: &str) -> Option<CountryDetails> {
    // no dialing code starts with 0, and "091" must never match 91
    if digits.starts_with('0') {
        return None;
    }
    for len in (1..=3.min(digits.len())).rev() {
        let Ok(prefix) = digits[..len].parse::<u16>() else {
            continue;
        };
        if let Some(found) = COUNTRIES.iter().find(|(_, _, code)| *code == prefix) {
            return Some(details(*found));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_iso_finds_known_regions() {
        let india = by_iso("IN").unwrap();
        assert_eq!(india.name, "India");
        assert_eq!(india.dialing_code, 91);
        assert_eq!(by_iso("US").unwrap().dialing_code, 1);
    }

    #[test]
    fn by_iso_yields_none_for_sentinel() {
        assert!(by_iso("UNKNOWN").is_none());
        assert!(by_iso("").is_none());
    }

    #[test]
    fn dialing_prefix_prefers_longest_code() {
        assert_eq!(by_dialing_prefix("3519123456").unwrap().iso, "PT");
        assert_eq!(by_dialing_prefix("919912345678").unwrap().iso, "IN");
        assert_eq!(by_dialing_prefix("4171234567").unwrap().iso, "CH");
    }

    #[test]
    fn shared_code_resolves_to_first_entry() {
        assert_eq!(by_dialing_prefix("14155552671").unwrap().iso, "US");
        assert_eq!(by_dialing_prefix("79161234567").unwrap().iso, "RU");
    }

    #[test]
    fn covers_every_geographic_zone() {
        for (digits, iso) in [
            ("2296123456", "BJ"),
            ("2115551234", "SS"),
            ("67712345", "SB"),
            ("5001234", "FK"),
            ("8501234567", "KP"),
            ("9705551234", "PS"),
        ] {
            assert_eq!(by_dialing_prefix(digits).unwrap().iso, iso, "for {digits}");
        }
    }

    #[test]
    fn unknown_prefix_yields_none() {
        assert!(by_dialing_prefix("0123456789").is_none());
        assert!(by_dialing_prefix("").is_none());
    }
}
