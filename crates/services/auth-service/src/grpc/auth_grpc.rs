//! gRPC implementation for AuthService.
//!
//! Every `AppError` kind is converted through `Status::from`, which gives
//! each kind its own status code.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::warn;

use crate::service::AuthService;
use proto::auth::{
    auth_service_server::AuthService as AuthServiceProto, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse, VerifyTokenRequest, VerifyTokenResponse,
};

/// gRPC service wrapper for AuthService.
pub struct AuthGrpcService {
    service: Arc<dyn AuthService>,
}

impl AuthGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();

        let user_id = self
            .service
            .register(req.email, req.password)
            .await
            .map_err(Status::from)?;

        // New accounts get a session straight away. The account stays
        // registered if this fails; the caller can log in to get a token.
        let token = self.service.issue_token(user_id).map_err(|e| {
            warn!(user_id = %user_id, "Account created but session token not issued");
            Status::from(e)
        })?;

        Ok(Response::new(RegisterResponse {
            token: token.access_token,
            user_id: user_id.get(),
        }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        let token = self
            .service
            .login(req.email, req.password)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(LoginResponse {
            token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let req = request.into_inner();

        let response = match self.service.verify_token(&req.token) {
            Ok(claims) => VerifyTokenResponse {
                valid: true,
                user_id: claims.user_id,
            },
            Err(_) => VerifyTokenResponse {
                valid: false,
                user_id: 0,
            },
        };

        Ok(Response::new(response))
    }
}
