pub mod agent;
pub mod context;
pub mod listener;
pub mod transaction;

#[cfg(test)]
mod tests;
