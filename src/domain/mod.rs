mod giveaway;
mod platforms;
mod announced;

pub use giveaway::*;
pub use platforms::*;
pub use announced::*;
