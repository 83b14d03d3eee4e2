pub mod draw;
pub mod verify;
