//! Command implementations wired from the public API.

pub mod install;
pub mod make_action;
pub mod make_dto;
