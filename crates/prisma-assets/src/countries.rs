//! Country name to ISO 3166-1 alpha-2 resolution.
//!
//! Configuration files and provider responses name countries loosely
//! ("china", "South Korea", "Korea, Republic of", "USA"). Everything
//! downstream keys exposure by alpha-2 code, so names are resolved here once.
//!
//! The table covers every ISO 3166-1 entry plus the European Union. Aliases
//! hold the ISO reference and official names (lowercase) and common
//! alternatives.

use prisma_traits::{PrismaError, Result};

/// One row of the country table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub alpha2: &'static str,
    /// ISO 3166-1 alpha-3 code.
    pub alpha3: &'static str,
    /// Common English name.
    pub name: &'static str,
    /// Other names seen in configuration and provider data.
    pub aliases: &'static [&'static str],
}

const fn country(
    alpha2: &'static str,
    alpha3: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
) -> Country {
    Country {
        alpha2,
        alpha3,
        name,
        aliases,
    }
}

static COUNTRIES: &[Country] = &[
    country("AD", "AND", "Andorra", &["principality of andorra"]),
    country("AE", "ARE", "United Arab Emirates", &["uae"]),
    country("AF", "AFG", "Afghanistan", &["islamic republic of afghanistan"]),
    country("AG", "ATG", "Antigua and Barbuda", &[]),
    country("AI", "AIA", "Anguilla", &[]),
    country("AL", "ALB", "Albania", &["republic of albania"]),
    country("AM", "ARM", "Armenia", &["republic of armenia"]),
    country("AO", "AGO", "Angola", &["republic of angola"]),
    country("AQ", "ATA", "Antarctica", &[]),
    country("AR", "ARG", "Argentina", &["argentine republic"]),
    country("AS", "ASM", "American Samoa", &[]),
    country("AT", "AUT", "Austria", &["republic of austria"]),
    country("AU", "AUS", "Australia", &[]),
    country("AW", "ABW", "Aruba", &[]),
    country("AX", "ALA", "Åland Islands", &["aland islands"]),
    country("AZ", "AZE", "Azerbaijan", &["republic of azerbaijan"]),
    country("BA", "BIH", "Bosnia and Herzegovina", &["republic of bosnia and herzegovina"]),
    country("BB", "BRB", "Barbados", &[]),
    country("BD", "BGD", "Bangladesh", &["people's republic of bangladesh"]),
    country("BE", "BEL", "Belgium", &["kingdom of belgium"]),
    country("BF", "BFA", "Burkina Faso", &[]),
    country("BG", "BGR", "Bulgaria", &["republic of bulgaria"]),
    country("BH", "BHR", "Bahrain", &["kingdom of bahrain"]),
    country("BI", "BDI", "Burundi", &["republic of burundi"]),
    country("BJ", "BEN", "Benin", &["republic of benin"]),
    country("BL", "BLM", "Saint Barthélemy", &["saint barthelemy"]),
    country("BM", "BMU", "Bermuda", &[]),
    country("BN", "BRN", "Brunei Darussalam", &["brunei"]),
    country(
        "BO",
        "BOL",
        "Bolivia",
        &["bolivia, plurinational state of", "plurinational state of bolivia"],
    ),
    country("BQ", "BES", "Bonaire, Sint Eustatius and Saba", &[]),
    country("BR", "BRA", "Brazil", &["federative republic of brazil"]),
    country("BS", "BHS", "Bahamas", &["commonwealth of the bahamas"]),
    country("BT", "BTN", "Bhutan", &["kingdom of bhutan"]),
    country("BV", "BVT", "Bouvet Island", &[]),
    country("BW", "BWA", "Botswana", &["republic of botswana"]),
    country("BY", "BLR", "Belarus", &["republic of belarus"]),
    country("BZ", "BLZ", "Belize", &[]),
    country("CA", "CAN", "Canada", &[]),
    country("CC", "CCK", "Cocos (Keeling) Islands", &[]),
    country(
        "CD",
        "COD",
        "Congo, The Democratic Republic of the",
        &["dr congo", "democratic republic of the congo"],
    ),
    country("CF", "CAF", "Central African Republic", &[]),
    country("CG", "COG", "Congo", &["republic of the congo"]),
    country("CH", "CHE", "Switzerland", &["swiss confederation"]),
    country(
        "CI",
        "CIV",
        "Côte d'Ivoire",
        &["republic of côte d'ivoire", "cote d'ivoire", "ivory coast"],
    ),
    country("CK", "COK", "Cook Islands", &[]),
    country("CL", "CHL", "Chile", &["republic of chile"]),
    country("CM", "CMR", "Cameroon", &["republic of cameroon"]),
    country("CN", "CHN", "China", &["prc", "mainland china", "people's republic of china"]),
    country("CO", "COL", "Colombia", &["republic of colombia"]),
    country("CR", "CRI", "Costa Rica", &["republic of costa rica"]),
    country("CU", "CUB", "Cuba", &["republic of cuba"]),
    country("CV", "CPV", "Cabo Verde", &["republic of cabo verde", "cape verde"]),
    country("CW", "CUW", "Curaçao", &["curacao"]),
    country("CX", "CXR", "Christmas Island", &[]),
    country("CY", "CYP", "Cyprus", &["republic of cyprus"]),
    country("CZ", "CZE", "Czechia", &["czech republic"]),
    country("DE", "DEU", "Germany", &["federal republic of germany"]),
    country("DJ", "DJI", "Djibouti", &["republic of djibouti"]),
    country("DK", "DNK", "Denmark", &["kingdom of denmark"]),
    country("DM", "DMA", "Dominica", &["commonwealth of dominica"]),
    country("DO", "DOM", "Dominican Republic", &[]),
    country("DZ", "DZA", "Algeria", &["people's democratic republic of algeria"]),
    country("EC", "ECU", "Ecuador", &["republic of ecuador"]),
    country("EE", "EST", "Estonia", &["republic of estonia"]),
    country("EG", "EGY", "Egypt", &["arab republic of egypt"]),
    country("EH", "ESH", "Western Sahara", &[]),
    country("ER", "ERI", "Eritrea", &["the state of eritrea"]),
    country("ES", "ESP", "Spain", &["kingdom of spain"]),
    country("ET", "ETH", "Ethiopia", &["federal democratic republic of ethiopia"]),
    country("EU", "EUU", "European Union", &["europe", "eurozone"]),
    country("FI", "FIN", "Finland", &["republic of finland"]),
    country("FJ", "FJI", "Fiji", &["republic of fiji"]),
    country("FK", "FLK", "Falkland Islands (Malvinas)", &[]),
    country("FM", "FSM", "Micronesia, Federated States of", &["federated states of micronesia"]),
    country("FO", "FRO", "Faroe Islands", &[]),
    country("FR", "FRA", "France", &["french republic"]),
    country("GA", "GAB", "Gabon", &["gabonese republic"]),
    country(
        "GB",
        "GBR",
        "United Kingdom",
        &[
            "uk",
            "great britain",
            "britain",
            "england",
            "united kingdom of great britain and northern ireland",
        ],
    ),
    country("GD", "GRD", "Grenada", &[]),
    country("GE", "GEO", "Georgia", &[]),
    country("GF", "GUF", "French Guiana", &[]),
    country("GG", "GGY", "Guernsey", &[]),
    country("GH", "GHA", "Ghana", &["republic of ghana"]),
    country("GI", "GIB", "Gibraltar", &[]),
    country("GL", "GRL", "Greenland", &[]),
    country("GM", "GMB", "Gambia", &["republic of the gambia"]),
    country("GN", "GIN", "Guinea", &["republic of guinea"]),
    country("GP", "GLP", "Guadeloupe", &[]),
    country("GQ", "GNQ", "Equatorial Guinea", &["republic of equatorial guinea"]),
    country("GR", "GRC", "Greece", &["hellenic republic"]),
    country("GS", "SGS", "South Georgia and the South Sandwich Islands", &[]),
    country("GT", "GTM", "Guatemala", &["republic of guatemala"]),
    country("GU", "GUM", "Guam", &[]),
    country("GW", "GNB", "Guinea-Bissau", &["republic of guinea-bissau"]),
    country("GY", "GUY", "Guyana", &["republic of guyana"]),
    country("HK", "HKG", "Hong Kong", &["hong kong special administrative region of china"]),
    country("HM", "HMD", "Heard Island and McDonald Islands", &[]),
    country("HN", "HND", "Honduras", &["republic of honduras"]),
    country("HR", "HRV", "Croatia", &["republic of croatia"]),
    country("HT", "HTI", "Haiti", &["republic of haiti"]),
    country("HU", "HUN", "Hungary", &[]),
    country("ID", "IDN", "Indonesia", &["republic of indonesia"]),
    country("IE", "IRL", "Ireland", &[]),
    country("IL", "ISR", "Israel", &["state of israel"]),
    country("IM", "IMN", "Isle of Man", &[]),
    country("IN", "IND", "India", &["republic of india"]),
    country("IO", "IOT", "British Indian Ocean Territory", &[]),
    country("IQ", "IRQ", "Iraq", &["republic of iraq"]),
    country("IR", "IRN", "Iran", &["iran, islamic republic of", "islamic republic of iran"]),
    country("IS", "ISL", "Iceland", &["republic of iceland"]),
    country("IT", "ITA", "Italy", &["italian republic"]),
    country("JE", "JEY", "Jersey", &[]),
    country("JM", "JAM", "Jamaica", &[]),
    country("JO", "JOR", "Jordan", &["hashemite kingdom of jordan"]),
    country("JP", "JPN", "Japan", &[]),
    country("KE", "KEN", "Kenya", &["republic of kenya"]),
    country("KG", "KGZ", "Kyrgyzstan", &["kyrgyz republic"]),
    country("KH", "KHM", "Cambodia", &["kingdom of cambodia"]),
    country("KI", "KIR", "Kiribati", &["republic of kiribati"]),
    country("KM", "COM", "Comoros", &["union of the comoros"]),
    country("KN", "KNA", "Saint Kitts and Nevis", &[]),
    country(
        "KP",
        "PRK",
        "North Korea",
        &[
            "korea, democratic people's republic of",
            "democratic people's republic of korea",
            "dprk",
        ],
    ),
    country("KR", "KOR", "South Korea", &["korea", "korea, republic of", "republic of korea"]),
    country("KW", "KWT", "Kuwait", &["state of kuwait"]),
    country("KY", "CYM", "Cayman Islands", &[]),
    country("KZ", "KAZ", "Kazakhstan", &["republic of kazakhstan"]),
    country("LA", "LAO", "Laos", &["lao people's democratic republic"]),
    country("LB", "LBN", "Lebanon", &["lebanese republic"]),
    country("LC", "LCA", "Saint Lucia", &[]),
    country("LI", "LIE", "Liechtenstein", &["principality of liechtenstein"]),
    country("LK", "LKA", "Sri Lanka", &["democratic socialist republic of sri lanka"]),
    country("LR", "LBR", "Liberia", &["republic of liberia"]),
    country("LS", "LSO", "Lesotho", &["kingdom of lesotho"]),
    country("LT", "LTU", "Lithuania", &["republic of lithuania"]),
    country("LU", "LUX", "Luxembourg", &["grand duchy of luxembourg"]),
    country("LV", "LVA", "Latvia", &["republic of latvia"]),
    country("LY", "LBY", "Libya", &[]),
    country("MA", "MAR", "Morocco", &["kingdom of morocco"]),
    country("MC", "MCO", "Monaco", &["principality of monaco"]),
    country("MD", "MDA", "Moldova", &["moldova, republic of", "republic of moldova"]),
    country("ME", "MNE", "Montenegro", &[]),
    country("MF", "MAF", "Saint Martin (French part)", &[]),
    country("MG", "MDG", "Madagascar", &["republic of madagascar"]),
    country("MH", "MHL", "Marshall Islands", &["republic of the marshall islands"]),
    country("MK", "MKD", "North Macedonia", &["republic of north macedonia", "macedonia"]),
    country("ML", "MLI", "Mali", &["republic of mali"]),
    country("MM", "MMR", "Myanmar", &["republic of myanmar", "burma"]),
    country("MN", "MNG", "Mongolia", &[]),
    country("MO", "MAC", "Macao", &["macau", "macao special administrative region of china"]),
    country(
        "MP",
        "MNP",
        "Northern Mariana Islands",
        &["commonwealth of the northern mariana islands"],
    ),
    country("MQ", "MTQ", "Martinique", &[]),
    country("MR", "MRT", "Mauritania", &["islamic republic of mauritania"]),
    country("MS", "MSR", "Montserrat", &[]),
    country("MT", "MLT", "Malta", &["republic of malta"]),
    country("MU", "MUS", "Mauritius", &["republic of mauritius"]),
    country("MV", "MDV", "Maldives", &["republic of maldives"]),
    country("MW", "MWI", "Malawi", &["republic of malawi"]),
    country("MX", "MEX", "Mexico", &["united mexican states"]),
    country("MY", "MYS", "Malaysia", &[]),
    country("MZ", "MOZ", "Mozambique", &["republic of mozambique"]),
    country("NA", "NAM", "Namibia", &["republic of namibia"]),
    country("NC", "NCL", "New Caledonia", &[]),
    country("NE", "NER", "Niger", &["republic of the niger"]),
    country("NF", "NFK", "Norfolk Island", &[]),
    country("NG", "NGA", "Nigeria", &["federal republic of nigeria"]),
    country("NI", "NIC", "Nicaragua", &["republic of nicaragua"]),
    country(
        "NL",
        "NLD",
        "Netherlands",
        &["holland", "the netherlands", "kingdom of the netherlands"],
    ),
    country("NO", "NOR", "Norway", &["kingdom of norway"]),
    country("NP", "NPL", "Nepal", &["federal democratic republic of nepal"]),
    country("NR", "NRU", "Nauru", &["republic of nauru"]),
    country("NU", "NIU", "Niue", &[]),
    country("NZ", "NZL", "New Zealand", &[]),
    country("OM", "OMN", "Oman", &["sultanate of oman"]),
    country("PA", "PAN", "Panama", &["republic of panama"]),
    country("PE", "PER", "Peru", &["republic of peru"]),
    country("PF", "PYF", "French Polynesia", &[]),
    country("PG", "PNG", "Papua New Guinea", &["independent state of papua new guinea"]),
    country("PH", "PHL", "Philippines", &["republic of the philippines"]),
    country("PK", "PAK", "Pakistan", &["islamic republic of pakistan"]),
    country("PL", "POL", "Poland", &["republic of poland"]),
    country("PM", "SPM", "Saint Pierre and Miquelon", &[]),
    country("PN", "PCN", "Pitcairn", &[]),
    country("PR", "PRI", "Puerto Rico", &[]),
    country("PS", "PSE", "Palestine, State of", &["the state of palestine", "palestine"]),
    country("PT", "PRT", "Portugal", &["portuguese republic"]),
    country("PW", "PLW", "Palau", &["republic of palau"]),
    country("PY", "PRY", "Paraguay", &["republic of paraguay"]),
    country("QA", "QAT", "Qatar", &["state of qatar"]),
    country("RE", "REU", "Réunion", &["reunion"]),
    country("RO", "ROU", "Romania", &[]),
    country("RS", "SRB", "Serbia", &["republic of serbia"]),
    country("RU", "RUS", "Russia", &["russian federation"]),
    country("RW", "RWA", "Rwanda", &["rwandese republic"]),
    country("SA", "SAU", "Saudi Arabia", &["kingdom of saudi arabia"]),
    country("SB", "SLB", "Solomon Islands", &[]),
    country("SC", "SYC", "Seychelles", &["republic of seychelles"]),
    country("SD", "SDN", "Sudan", &["republic of the sudan"]),
    country("SE", "SWE", "Sweden", &["kingdom of sweden"]),
    country("SG", "SGP", "Singapore", &["republic of singapore"]),
    country("SH", "SHN", "Saint Helena, Ascension and Tristan da Cunha", &[]),
    country("SI", "SVN", "Slovenia", &["republic of slovenia"]),
    country("SJ", "SJM", "Svalbard and Jan Mayen", &[]),
    country("SK", "SVK", "Slovakia", &["slovak republic"]),
    country("SL", "SLE", "Sierra Leone", &["republic of sierra leone"]),
    country("SM", "SMR", "San Marino", &["republic of san marino"]),
    country("SN", "SEN", "Senegal", &["republic of senegal"]),
    country("SO", "SOM", "Somalia", &["federal republic of somalia"]),
    country("SR", "SUR", "Suriname", &["republic of suriname"]),
    country("SS", "SSD", "South Sudan", &["republic of south sudan"]),
    country(
        "ST",
        "STP",
        "Sao Tome and Principe",
        &["democratic republic of sao tome and principe"],
    ),
    country("SV", "SLV", "El Salvador", &["republic of el salvador"]),
    country("SX", "SXM", "Sint Maarten (Dutch part)", &[]),
    country("SY", "SYR", "Syria", &["syrian arab republic"]),
    country("SZ", "SWZ", "Eswatini", &["kingdom of eswatini", "swaziland"]),
    country("TC", "TCA", "Turks and Caicos Islands", &[]),
    country("TD", "TCD", "Chad", &["republic of chad"]),
    country("TF", "ATF", "French Southern Territories", &[]),
    country("TG", "TGO", "Togo", &["togolese republic"]),
    country("TH", "THA", "Thailand", &["kingdom of thailand"]),
    country("TJ", "TJK", "Tajikistan", &["republic of tajikistan"]),
    country("TK", "TKL", "Tokelau", &[]),
    country("TL", "TLS", "Timor-Leste", &["democratic republic of timor-leste"]),
    country("TM", "TKM", "Turkmenistan", &[]),
    country("TN", "TUN", "Tunisia", &["republic of tunisia"]),
    country("TO", "TON", "Tonga", &["kingdom of tonga"]),
    country("TR", "TUR", "Turkey", &["turkiye", "türkiye", "republic of türkiye"]),
    country("TT", "TTO", "Trinidad and Tobago", &["republic of trinidad and tobago"]),
    country("TV", "TUV", "Tuvalu", &[]),
    country("TW", "TWN", "Taiwan", &["taiwan, province of china", "chinese taipei"]),
    country(
        "TZ",
        "TZA",
        "Tanzania",
        &["tanzania, united republic of", "united republic of tanzania"],
    ),
    country("UA", "UKR", "Ukraine", &[]),
    country("UG", "UGA", "Uganda", &["republic of uganda"]),
    country("UM", "UMI", "United States Minor Outlying Islands", &[]),
    country("US", "USA", "United States", &["us", "usa", "america", "united states of america"]),
    country("UY", "URY", "Uruguay", &["eastern republic of uruguay"]),
    country("UZ", "UZB", "Uzbekistan", &["republic of uzbekistan"]),
    country("VA", "VAT", "Holy See (Vatican City State)", &["vatican", "holy see"]),
    country("VC", "VCT", "Saint Vincent and the Grenadines", &[]),
    country(
        "VE",
        "VEN",
        "Venezuela",
        &["venezuela, bolivarian republic of", "bolivarian republic of venezuela"],
    ),
    country("VG", "VGB", "Virgin Islands, British", &["british virgin islands"]),
    country("VI", "VIR", "Virgin Islands, U.S.", &["virgin islands of the united states"]),
    country("VN", "VNM", "Vietnam", &["viet nam", "socialist republic of viet nam"]),
    country("VU", "VUT", "Vanuatu", &["republic of vanuatu"]),
    country("WF", "WLF", "Wallis and Futuna", &[]),
    country("WS", "WSM", "Samoa", &["independent state of samoa"]),
    country("YE", "YEM", "Yemen", &["republic of yemen"]),
    country("YT", "MYT", "Mayotte", &[]),
    country("ZA", "ZAF", "South Africa", &["republic of south africa"]),
    country("ZM", "ZMB", "Zambia", &["republic of zambia"]),
    country("ZW", "ZWE", "Zimbabwe", &["republic of zimbabwe"]),
];

/// Resolves free-form country names to alpha-2 codes.
///
/// Resolution order: alpha-2 code, alpha-3 code, exact name or alias, then
/// the shortest table name or alias containing the query. Matching ignores
/// case and surrounding whitespace.
#[derive(Debug, Clone, Copy)]
pub struct CountryLookup {
    table: &'static [Country],
}

impl Default for CountryLookup {
    fn default() -> Self {
        Self { table: COUNTRIES }
    }
}

impl CountryLookup {
    /// Lookup over the built-in country table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All known countries.
    #[must_use]
    pub const fn countries(&self) -> &'static [Country] {
        self.table
    }

    /// Resolve `query` to an alpha-2 code, `None` if nothing matches.
    #[must_use]
    pub fn lookup(&self, query: &str) -> Option<&'static str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let exact = self
            .table
            .iter()
            .find(|c| c.alpha2.eq_ignore_ascii_case(&query))
            .or_else(|| {
                self.table
                    .iter()
                    .find(|c| c.alpha3.eq_ignore_ascii_case(&query))
            })
            .or_else(|| {
                self.table.iter().find(|c| {
                    c.name.to_lowercase() == query || c.aliases.iter().any(|a| *a == query)
                })
            });
        if let Some(found) = exact {
            return Some(found.alpha2);
        }

        // Closest containing name; the first table entry wins on a tie.
        let mut best: Option<(usize, &'static str)> = None;
        for c in self.table {
            let names = std::iter::once(c.name).chain(c.aliases.iter().copied());
            for name in names {
                let lower = name.to_lowercase();
                if !lower.contains(&query) {
                    continue;
                }
                let distance = lower.len() - query.len();
                if best.is_none_or(|(d, _)| distance < d) {
                    best = Some((distance, c.alpha2));
                }
            }
        }
        best.map(|(_, code)| code)
    }

    /// Resolve `query` to an alpha-2 code.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::UnknownCountry`] if nothing matches.
    pub fn resolve(&self, query: &str) -> Result<&'static str> {
        self.lookup(query)
            .ok_or_else(|| PrismaError::UnknownCountry(query.to_string()))
    }

    /// Resolve every name, failing on the first unknown one.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::UnknownCountry`] for the first unresolvable name.
    pub fn resolve_all<I, S>(&self, queries: I) -> Result<Vec<&'static str>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        queries
            .into_iter()
            .map(|q| self.resolve(q.as_ref()))
            .collect()
    }

    /// Common name for an alpha-2 code.
    #[must_use]
    pub fn name(&self, alpha2: &str) -> Option<&'static str> {
        self.table
            .iter()
            .find(|c| c.alpha2.eq_ignore_ascii_case(alpha2))
            .map(|c| c.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_names() {
        let lookup = CountryLookup::new();
        assert_eq!(lookup.lookup("cn"), Some("CN"));
        assert_eq!(lookup.lookup("KOR"), Some("KR"));
        assert_eq!(lookup.lookup("China"), Some("CN"));
        assert_eq!(lookup.lookup("  germany "), Some("DE"));
    }

    #[test]
    fn test_aliases() {
        let lookup = CountryLookup::new();
        assert_eq!(lookup.lookup("uk"), Some("GB"));
        assert_eq!(lookup.lookup("usa"), Some("US"));
        assert_eq!(lookup.lookup("Korea, Republic of"), Some("KR"));
        assert_eq!(lookup.lookup("europe"), Some("EU"));
    }

    #[test]
    fn test_substring_prefers_closest_length() {
        let lookup = CountryLookup::new();
        assert_eq!(lookup.lookup("kingdom"), Some("GB"));
        // "states" is inside "United States" and "united states of america"
        assert_eq!(lookup.lookup("states"), Some("US"));
        assert_eq!(lookup.lookup("zeal"), Some("NZ"));
    }

    #[test]
    fn test_unknown_country() {
        let lookup = CountryLookup::new();
        assert_eq!(lookup.lookup("atlantis"), None);
        assert_eq!(lookup.lookup(""), None);
        assert!(matches!(
            lookup.resolve("atlantis"),
            Err(PrismaError::UnknownCountry(name)) if name == "atlantis"
        ));
    }

    #[test]
    fn test_resolve_all() {
        let lookup = CountryLookup::new();
        assert_eq!(
            lookup.resolve_all(["china", "us", "kr"]).unwrap(),
            vec!["CN", "US", "KR"]
        );
        assert!(lookup.resolve_all(["china", "narnia"]).is_err());
    }

    #[test]
    fn test_every_iso_entry_round_trips() {
        let lookup = CountryLookup::new();
        assert_eq!(lookup.countries().len(), 250);
        for country in lookup.countries() {
            assert_eq!(lookup.lookup(country.alpha2), Some(country.alpha2));
            assert_eq!(lookup.resolve(country.alpha3).unwrap(), country.alpha2);
            assert_eq!(lookup.lookup(country.name), Some(country.alpha2), "{}", country.name);
            assert_eq!(lookup.name(country.alpha2), Some(country.name));
            for alias in country.aliases {
                assert_eq!(lookup.lookup(alias), Some(country.alpha2), "{alias}");
            }
        }
    }

    #[test]
    fn test_less_common_markets() {
        let lookup = CountryLookup::new();
        assert_eq!(
            lookup.resolve_all(["Pakistan", "nigeria", "KENYA", "Iceland"]).unwrap(),
            vec!["PK", "NG", "KE", "IS"]
        );
        assert_eq!(lookup.lookup("Viet Nam"), Some("VN"));
        assert_eq!(lookup.lookup("Iran, Islamic Republic of"), Some("IR"));
        assert_eq!(lookup.lookup("ivory coast"), Some("CI"));
        assert_eq!(lookup.lookup("Congo"), Some("CG"));
        assert_eq!(lookup.lookup("dr congo"), Some("CD"));
    }

    #[test]
    fn test_name() {
        let lookup = CountryLookup::new();
        assert_eq!(lookup.name("JP"), Some("Japan"));
        assert_eq!(lookup.name("XX"), None);
    }
}
