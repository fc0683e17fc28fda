pub mod admission_request;
pub mod admission_response;
pub mod admission_review;
pub mod errors;
pub mod handler;
pub mod mutation;
pub mod resource;
pub mod rewrite;
pub mod settings;

pub use admission_request::AdmissionRequest;
pub use admission_response::{AdmissionResponse, PatchType};
pub use admission_review::{AdmissionReviewRequest, AdmissionReviewResponse};
pub use handler::MutationHandler;
pub use rewrite::RewriteRule;
pub use settings::{MutationSettings, TargetLabel};
