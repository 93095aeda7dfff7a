//! Guard Rounds
//! 
//! Servicio de rondas de guardias: validación de marcajes de puntos de
//! control escaneados por QR, geocerca y estado de las rondas.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
