//! gRPC transport adapter.

mod auth_grpc;

pub use auth_grpc::AuthGrpcService;
