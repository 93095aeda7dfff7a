//! Controladores
//! 
//! Orquestan la validación de requests, los servicios y la conversión a DTOs.

pub mod marking_controller;
pub mod round_controller;
