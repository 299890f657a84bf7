pub mod admins;
pub mod sessions;
pub mod submissions;
pub mod surveys;
