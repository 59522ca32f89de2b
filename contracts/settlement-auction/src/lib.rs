//! # Settlement auction
//!
//! A single-lot auction that settles through one-way transfers.
//!
//! The instance is opened with an end time, an auctioneer, the asset bids are
//! placed in and optionally a CIS1 token that the winner receives. Bids are
//! placed either by attaching CCD to `bid` or, for token auctions, by
//! transferring the bid token to this instance, which makes the token
//! contract call the `onReceivingCIS1` hook.
//!
//! Every accepted bid must strictly exceed the highest bid so far. The new
//! bid is recorded first and only then is the displaced bid refunded, so the
//! recorded highest bid always matches what the current leader paid.
//!
//! The prize is handed to the instance with a CIS1 transfer as well: the
//! hook accepts a single unit of the configured prize token and holds it.
//!
//! After the end time anyone may `claim` the auction exactly once: the
//! winning bid is paid out to the auctioneer and the held prize is sent to
//! the winner. Transfers are returned as actions and executed by the chain
//! after the call. Each one falls back to `accept`, so a failing transfer
//! never reverts the call that issued it.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{
    claim::*, deposit::*, dispatch::*, events::*, state::*, structs::*, validator::*,
};
use commons::*;
use concordium_cis1::*;
use concordium_std::*;

mod claim;
mod contract;
mod deposit;
mod dispatch;
mod events;
mod state;
mod structs;
mod validator;

#[concordium_cfg_test]
mod fixtures;
