use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;
use tracing::Instrument;
use uuid::Uuid;

use super::handlers::is_admin;
use super::handlers::login;
use super::handlers::register;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

/// gRPC façade over the authentication service.
///
/// Every call runs inside a span carrying a fresh request ID.
pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

fn request_span(rpc: &'static str) -> tracing::Span {
    tracing::info_span!("grpc", rpc, request_id = %Uuid::new_v4())
}

#[tonic::async_trait]
impl<S: AuthServicePort> Auth for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(self.service.as_ref(), request.into_inner())
            .instrument(request_span("Register"))
            .await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.service.as_ref(), request.into_inner())
            .instrument(request_span("Login"))
            .await?;
        Ok(Response::new(response))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let response = is_admin::is_admin(self.service.as_ref(), request.into_inner())
            .instrument(request_span("IsAdmin"))
            .await?;
        Ok(Response::new(response))
    }
}
