//! Types, errors and event tags shared by the settlement auction contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{constants::*, errors::*, structs::*, types::*};
use concordium_cis1::*;
use concordium_std::*;

mod constants;
mod errors;
mod structs;
mod types;
