pub mod activities;
pub mod bookings;
pub mod content;
pub mod services;
pub mod testimonials;
pub mod users;
