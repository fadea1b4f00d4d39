pub mod extract;
pub mod health;
pub mod parking_spot;
