pub mod checkbox;
pub mod pods;
pub mod progress;
pub mod starred;
pub mod users;
