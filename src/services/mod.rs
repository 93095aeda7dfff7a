//! Services module
//! 
//! Este módulo contiene la lógica de negocio: catálogo de puntos,
//! geocerca, validación de marcajes y consultas de avance de rondas.

pub mod catalog;
pub mod geofence;
pub mod marking_validator;
pub mod round_locks;
pub mod round_service;

pub use marking_validator::{AcceptedMarking, MarkingOutcome, MarkingRejection, MarkingValidator};
pub use round_locks::RoundLocks;
pub use round_service::{RoundService, RoundSummary};
