//! DTOs de la API
//! 
//! Requests y responses JSON de los endpoints HTTP.

pub mod marking_dto;
pub mod round_dto;
