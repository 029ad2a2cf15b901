pub mod user;
pub mod waitlist;
