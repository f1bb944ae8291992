mod login;
mod profile;
mod register;

pub use login::login;
pub use profile::profile;
pub use register::register;
