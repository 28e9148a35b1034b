/// Scripted host console.
pub mod host;
