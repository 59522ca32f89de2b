use super::*;

mod token;

pub use self::token::*;
