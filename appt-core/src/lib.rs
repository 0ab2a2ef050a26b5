pub mod booking;
pub mod config;
pub mod contact;
pub mod keywords;
pub mod render;
pub mod resolver;

pub use booking::{Appointment, Booker, BookingError};
pub use config::Config;
pub use contact::{Contact, ContactError};
pub use resolver::{DateUnresolved, ResolveOptions, resolve};
