pub mod input;
pub mod lighting;
pub mod time;
