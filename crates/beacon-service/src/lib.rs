//! # beacon-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    ApiResponse, CleanupRequest, CleanupResponse, DeleteFilesRequest, DeleteFilesResponse,
    HealthChecks, HealthResponse, PresenceQuery, PresenceResponse, ReadinessResponse,
    UpdatePresenceRequest,
};
pub use services::{
    DeletionSettings, FileCleanupService, PresenceService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
