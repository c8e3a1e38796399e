use std::collections::HashMap;

/// (code, name, IANA timezone) for the built-in US region table
const US_REGIONS: &[(&str, &str, &str)] = &[
    ("AK", "Alaska", "America/Anchorage"),
    ("AL", "Alabama", "America/Chicago"),
    ("AR", "Arkansas", "America/Chicago"),
    ("AZ", "Arizona", "America/Phoenix"),
    ("CA", "California", "America/Los_Angeles"),
    ("CO", "Colorado", "America/Denver"),
    ("CT", "Connecticut", "America/New_York"),
    ("DC", "District of Columbia", "America/New_York"),
    ("DE", "Delaware", "America/New_York"),
    ("FL", "Florida", "America/New_York"),
    ("GA", "Georgia", "America/New_York"),
    ("HI", "Hawaii", "Pacific/Honolulu"),
    ("IA", "Iowa", "America/Chicago"),
    ("ID", "Idaho", "America/Denver"),
    ("IL", "Illinois", "America/Chicago"),
    ("IN", "Indiana", "America/Indiana/Indianapolis"),
    ("KS", "Kansas", "America/Chicago"),
    ("KY", "Kentucky", "America/New_York"),
    ("LA", "Louisiana", "America/Chicago"),
    ("MA", "Massachusetts", "America/New_York"),
    ("MD", "Maryland", "America/New_York"),
    ("ME", "Maine", "America/New_York"),
    ("MI", "Michigan", "America/New_York"),
    ("MN", "Minnesota", "America/Chicago"),
    ("MO", "Missouri", "America/Chicago"),
    ("MS", "Mississippi", "America/Chicago"),
    ("MT", "Montana", "America/Denver"),
    ("NC", "North Carolina", "America/New_York"),
    ("ND", "North Dakota", "America/Chicago"),
    ("NE", "Nebraska", "America/Chicago"),
    ("NH", "New Hampshire", "America/New_York"),
    ("NJ", "New Jersey", "America/New_York"),
    ("NM", "New Mexico", "America/Denver"),
    ("NV", "Nevada", "America/Los_Angeles"),
    ("NY", "New York", "America/New_York"),
    ("OH", "Ohio", "America/New_York"),
    ("OK", "Oklahoma", "America/Chicago"),
    ("OR", "Oregon", "America/Los_Angeles"),
    ("PA", "Pennsylvania", "America/New_York"),
    ("RI", "Rhode Island", "America/New_York"),
    ("SC", "South Carolina", "America/New_York"),
    ("SD", "South Dakota", "America/Chicago"),
    ("TN", "Tennessee", "America/Chicago"),
    ("TX", "Texas", "America/Chicago"),
    ("UT", "Utah", "America/Denver"),
    ("VA", "Virginia", "America/New_York"),
    ("VT", "Vermont", "America/New_York"),
    ("WA", "Washington", "America/Los_Angeles"),
    ("WI", "Wisconsin", "America/Chicago"),
    ("WV", "West Virginia", "America/New_York"),
    ("WY", "Wyoming", "America/Denver"),
];

lazy_static::lazy_static! {
    /// Region code -> IANA timezone
    pub static ref REGION_TIMEZONES: HashMap<String, String> = US_REGIONS
        .iter()
        .map(|(code, _, tz)| (code.to_string(), tz.to_string()))
        .collect();

    /// Lowercased full region name -> region code
    pub static ref REGION_NAMES: HashMap<String, String> = US_REGIONS
        .iter()
        .map(|(code, name, _)| (name.to_lowercase(), code.to_string()))
        .collect();
}
