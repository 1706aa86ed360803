//! Submitted form fields mapped onto payloads.
//!
//! Every entity has an explicit table of accepted fields, each with a setter
//! that converts one submitted value. Keys not in the table are ignored, repeated
//! keys (`genres`) are applied in order. The populated payload is then validated
//! with garde.

use garde::Validate;
use showbook_dal::{artist::CreateArtist, show::CreateShow, venue::CreateVenue};
use showbook_types::datetime::parse_show_time;
use time::PrimitiveDateTime;

pub type Submitted = Vec<(String, String)>;

type Setter<T> = fn(&mut T, &str) -> Result<(), String>;

pub struct FormField<T> {
    pub name: &'static str,
    set: Setter<T>,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Invalid value of field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Missing field {0}")]
    MissingField(&'static str),

    #[error("Validation failed: {0}")]
    Invalid(#[from] garde::Report),
}

fn text(value: &str) -> String {
    value.trim().to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Checkbox style flag, an unchecked box is simply not submitted
pub fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "on" | "true" | "1" => Ok(true),
        "n" | "no" | "off" | "false" | "0" | "" => Ok(false),
        other => Err(format!("{other} is not a boolean value")),
    }
}

fn parse_id(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("{value} is not a valid id: {e}"))
}

pub static VENUE_FORM: &[FormField<CreateVenue>] = &[
    FormField {
        name: "name",
        set: |v, s| {
            v.name = text(s);
            Ok(())
        },
    },
    FormField {
        name: "city",
        set: |v, s| {
            v.city = text(s);
            Ok(())
        },
    },
    FormField {
        name: "state",
        set: |v, s| {
            v.state = text(s);
            Ok(())
        },
    },
    FormField {
        name: "address",
        set: |v, s| {
            v.address = text(s);
            Ok(())
        },
    },
    FormField {
        name: "phone",
        set: |v, s| {
            v.phone = optional(s);
            Ok(())
        },
    },
    FormField {
        name: "image_link",
        set: |v, s| {
            v.image_link = optional(s);
            Ok(())
        },
    },
    FormField {
        name: "facebook_link",
        set: |v, s| {
            v.facebook_link = optional(s);
            Ok(())
        },
    },
    FormField {
        name: "website",
        set: |v, s| {
            v.website = optional(s);
            Ok(())
        },
    },
    FormField {
        name: "genres",
        set: |v, s| {
            v.genres.extend(optional(s));
            Ok(())
        },
    },
    FormField {
        name: "seeking_talent",
        set: |v, s| {
            v.seeking_talent = parse_flag(s)?;
            Ok(())
        },
    },
    FormField {
        name: "seeking_description",
        set: |v, s| {
            v.seeking_description = optional(s);
            Ok(())
        },
    },
];

pub static ARTIST_FORM: &[FormField<CreateArtist>] = &[
    FormField {
        name: "name",
        set: |a, s| {
            a.name = text(s);
            Ok(())
        },
    },
    FormField {
        name: "city",
        set: |a, s| {
            a.city = text(s);
            Ok(())
        },
    },
    FormField {
        name: "state",
        set: |a, s| {
            a.state = text(s);
            Ok(())
        },
    },
    FormField {
        name: "phone",
        set: |a, s| {
            a.phone = optional(s);
            Ok(())
        },
    },
    FormField {
        name: "image_link",
        set: |a, s| {
            a.image_link = optional(s);
            Ok(())
        },
    },
    FormField {
        name: "facebook_link",
        set: |a, s| {
            a.facebook_link = optional(s);
            Ok(())
        },
    },
    FormField {
        name: "website",
        set: |a, s| {
            a.website = optional(s);
            Ok(())
        },
    },
    FormField {
        name: "genres",
        set: |a, s| {
            a.genres.extend(optional(s));
            Ok(())
        },
    },
    FormField {
        name: "seeking_venue",
        set: |a, s| {
            a.seeking_venue = parse_flag(s)?;
            Ok(())
        },
    },
    FormField {
        name: "seeking_description",
        set: |a, s| {
            a.seeking_description = optional(s);
            Ok(())
        },
    },
];

#[derive(Debug, Default)]
pub struct ShowDraft {
    venue_id: Option<i64>,
    artist_id: Option<i64>,
    start_time: Option<PrimitiveDateTime>,
}

pub static SHOW_FORM: &[FormField<ShowDraft>] = &[
    FormField {
        name: "venue_id",
        set: |d, s| {
            d.venue_id = Some(parse_id(s)?);
            Ok(())
        },
    },
    FormField {
        name: "artist_id",
        set: |d, s| {
            d.artist_id = Some(parse_id(s)?);
            Ok(())
        },
    },
    FormField {
        name: "start_time",
        set: |d, s| {
            d.start_time = Some(parse_show_time(s).map_err(|e| e.to_string())?);
            Ok(())
        },
    },
];

impl TryFrom<ShowDraft> for CreateShow {
    type Error = FormError;

    fn try_from(value: ShowDraft) -> Result<Self, Self::Error> {
        Ok(CreateShow {
            venue_id: value.venue_id.ok_or(FormError::MissingField("venue_id"))?,
            artist_id: value
                .artist_id
                .ok_or(FormError::MissingField("artist_id"))?,
            start_time: value
                .start_time
                .ok_or(FormError::MissingField("start_time"))?,
        })
    }
}

/// Builds a fresh value from submitted fields, so fields not submitted keep defaults
pub fn populate<T: Default>(
    fields: &[FormField<T>],
    submitted: &Submitted,
) -> Result<T, FormError> {
    let mut draft = T::default();
    for (key, value) in submitted {
        if let Some(field) = fields.iter().find(|f| f.name == key) {
            (field.set)(&mut draft, value).map_err(|reason| FormError::InvalidField {
                field: field.name,
                reason,
            })?;
        }
    }
    Ok(draft)
}

pub fn parse_venue(submitted: &Submitted) -> Result<CreateVenue, FormError> {
    let venue = populate(VENUE_FORM, submitted)?;
    venue.validate()?;
    Ok(venue)
}

pub fn parse_artist(submitted: &Submitted) -> Result<CreateArtist, FormError> {
    let artist = populate(ARTIST_FORM, submitted)?;
    artist.validate()?;
    Ok(artist)
}

pub fn parse_show(submitted: &Submitted) -> Result<CreateShow, FormError> {
    let show: CreateShow = populate(SHOW_FORM, submitted)?.try_into()?;
    show.validate()?;
    Ok(show)
}

/// First submitted value of a field, used in notifications
pub fn field_value<'a>(submitted: &'a Submitted, name: &str) -> Option<&'a str> {
    submitted
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim())
}
