//! Session orchestration for the digits game.
//!
//! [`Session`] wraps a puzzle [`GameState`](digitforge_core::GameState) with
//! everything a front end needs around it: the play mode, the countdown, the
//! challenge-run statistics, and the overlay flags. Every external stimulus —
//! a user action or a timer tick — enters through [`Session::apply`], the
//! single serialized mutation point, so the state never needs locking.
//!
//! [`Ticker`] is the only background activity: a cancellable thread that
//! posts one message per elapsed second into a channel, from which the front
//! end feeds [`SessionIntent::Tick`] into the session like any other intent.

pub mod session;
pub mod ticker;

pub use self::{
    session::{ChallengeStats, GameMode, Session, SessionIntent},
    ticker::Ticker,
};
