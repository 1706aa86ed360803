pub mod choices;
pub mod datetime;
pub mod genres;

pub use genres::GenreList;
