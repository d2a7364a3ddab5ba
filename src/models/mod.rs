mod calendar;
mod film;

pub use calendar::{Month, ParseCalendarError, Weekday};
pub use film::{CastCredit, CrewCredit, FilmRecord};
