//! One-shot notifications shown on the next rendered page.
//!
//! Pending notifications travel in a cookie, so they survive a redirect and
//! need no server side storage. Rendering a page takes them all.

use std::fmt::Display;

use axum::extract::FromRequestParts;
use http::{request::Parts, StatusCode};
use tower_cookies::{cookie::SameSite, Cookie, Cookies};
use url::form_urlencoded;

const FLASH_COOKIE_NAME: &str = "showbook_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Level::Success),
            "error" => Some(Level::Error),
            _ => None,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

fn encode(notifications: &[Notification]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for n in notifications {
        serializer.append_pair(n.level.as_str(), &n.message);
    }
    serializer.finish()
}

fn decode(value: &str) -> Vec<Notification> {
    form_urlencoded::parse(value.as_bytes())
        .filter_map(|(level, message)| {
            Level::parse(&level).map(|level| Notification {
                level,
                message: message.into_owned(),
            })
        })
        .collect()
}

pub struct Flash {
    cookies: Cookies,
}

impl Flash {
    pub fn new(cookies: Cookies) -> Self {
        Flash { cookies }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Level::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Level::Error, message.into())
    }

    fn push(&self, level: Level, message: String) {
        let mut pending = self.pending();
        pending.push(Notification { level, message });
        let cookie = Cookie::build((FLASH_COOKIE_NAME, encode(&pending)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        self.cookies.add(cookie);
    }

    fn pending(&self) -> Vec<Notification> {
        self.cookies
            .get(FLASH_COOKIE_NAME)
            .map(|c| decode(c.value()))
            .unwrap_or_default()
    }

    /// Returns all pending notifications and clears them
    pub fn take(&self) -> Vec<Notification> {
        let pending = self.pending();
        if self.cookies.get(FLASH_COOKIE_NAME).is_some() {
            self.cookies
                .remove(Cookie::build((FLASH_COOKIE_NAME, "")).path("/").build());
        }
        pending
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        Ok(Flash::new(cookies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding() {
        let notifications = vec![
            Notification {
                level: Level::Success,
                message: "Venue The Blue Note was successfully listed!".to_string(),
            },
            Notification {
                level: Level::Error,
                message: "An error occurred; 50% & \"quoted\", see=this".to_string(),
            },
        ];
        let encoded = encode(&notifications);
        assert!(!encoded.contains([' ', ';', ',', '"']));
        assert_eq!(decode(&encoded), notifications);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode("").is_empty());
        assert!(decode("warning=hello").is_empty());
        assert_eq!(decode("error=x&bogus").len(), 1);
    }
}
