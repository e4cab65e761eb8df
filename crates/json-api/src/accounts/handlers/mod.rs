//! Account Handlers

pub(crate) mod account;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;
