//! Wellness Companion - Supportive conversational assistant
//!
//! This crate guides a conversation through assessment, solution, action and
//! follow-up phases, watches every message for crisis language, and can speak
//! its replies aloud.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
