/// A US state as offered by the state select: shown by name, stored by abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsState {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

const fn st(name: &'static str, abbreviation: &'static str) -> UsState {
    UsState { name, abbreviation }
}

pub const STATES: [UsState; 51] = [
    st("Alabama", "AL"),
    st("Alaska", "AK"),
    st("Arizona", "AZ"),
    st("Arkansas", "AR"),
    st("California", "CA"),
    st("Colorado", "CO"),
    st("Connecticut", "CT"),
    st("Delaware", "DE"),
    st("District Of Columbia", "DC"),
    st("Florida", "FL"),
    st("Georgia", "GA"),
    st("Hawaii", "HI"),
    st("Idaho", "ID"),
    st("Illinois", "IL"),
    st("Indiana", "IN"),
    st("Iowa", "IA"),
    st("Kansas", "KS"),
    st("Kentucky", "KY"),
    st("Louisiana", "LA"),
    st("Maine", "ME"),
    st("Maryland", "MD"),
    st("Massachusetts", "MA"),
    st("Michigan", "MI"),
    st("Minnesota", "MN"),
    st("Mississippi", "MS"),
    st("Missouri", "MO"),
    st("Montana", "MT"),
    st("Nebraska", "NE"),
    st("Nevada", "NV"),
    st("New Hampshire", "NH"),
    st("New Jersey", "NJ"),
    st("New Mexico", "NM"),
    st("New York", "NY"),
    st("North Carolina", "NC"),
    st("North Dakota", "ND"),
    st("Ohio", "OH"),
    st("Oklahoma", "OK"),
    st("Oregon", "OR"),
    st("Pennsylvania", "PA"),
    st("Rhode Island", "RI"),
    st("South Carolina", "SC"),
    st("South Dakota", "SD"),
    st("Tennessee", "TN"),
    st("Texas", "TX"),
    st("Utah", "UT"),
    st("Vermont", "VT"),
    st("Virginia", "VA"),
    st("Washington", "WA"),
    st("West Virginia", "WV"),
    st("Wisconsin", "WI"),
    st("Wyoming", "WY"),
];
