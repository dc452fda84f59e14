mod health_check;
mod helpers;
mod send_email;

pub use health_check::health_check;
pub use helpers::error_chain_fmt;
pub use send_email::send_email;
