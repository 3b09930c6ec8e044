pub mod load;
pub mod sender;
