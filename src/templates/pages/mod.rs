pub mod login;
pub mod map;
pub mod reservations;

pub use login::login_page;
pub use map::{map_page, MapVm};
pub use reservations::{reservations_page, ReservationsVm};
