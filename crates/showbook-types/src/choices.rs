//! Fixed choice lists offered by the listing forms.

use phf::{phf_ordered_set, OrderedSet};

pub static STATES: OrderedSet<&'static str> = phf_ordered_set! {
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL",
    "IN", "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC",
    "ND", "OH", "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD",
    "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
};

pub static GENRES: OrderedSet<&'static str> = phf_ordered_set! {
    "Alternative", "Blues", "Classical", "Country", "Electronic", "Folk", "Funk",
    "Hip-Hop", "Heavy Metal", "Instrumental", "Jazz", "Musical Theatre", "Pop", "Punk",
    "R&B", "Reggae", "Rock n Roll", "Soul", "Other",
};

pub fn is_state(code: &str) -> bool {
    STATES.contains(code)
}

pub fn is_genre(name: &str) -> bool {
    GENRES.contains(name)
}
