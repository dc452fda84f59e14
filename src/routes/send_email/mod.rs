mod errors;
mod send_email_handler;
mod types;

pub use send_email_handler::send_email;
