use showbook_types::{choices, genres};

pub(crate) fn valid_state(state: &str, _ctx: &()) -> garde::Result {
    if choices::is_state(state) {
        Ok(())
    } else {
        Err(garde::Error::new(format!("unknown state {state}")))
    }
}

pub(crate) fn valid_genre(genre: &str, _ctx: &()) -> garde::Result {
    if !genres::is_encodable(genre) {
        Err(garde::Error::new("genre contains reserved characters"))
    } else if !choices::is_genre(genre) {
        Err(garde::Error::new(format!("unknown genre {genre}")))
    } else {
        Ok(())
    }
}
