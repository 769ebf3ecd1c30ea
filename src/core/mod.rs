pub mod constants;
pub mod keyring;
