pub mod errors;
pub mod db;
pub mod package;
pub mod admin;
pub mod session;

#[cfg(test)]
mod tests;
