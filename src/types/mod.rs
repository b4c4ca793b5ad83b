// src/types/mod.rs
//! Request and response payloads of the backend and the AI service

pub mod analysis;
pub mod calendar;
pub mod chat;
pub mod interview;
pub mod offre;
pub mod preferences;
pub mod reclamation;
pub mod user;
