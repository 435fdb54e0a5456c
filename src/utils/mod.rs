pub mod retry;
pub mod threads;
