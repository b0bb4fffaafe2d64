//! Auth Service Library
//!
//! This crate registers users with Argon2id-hashed passwords and issues
//! HS256 session tokens on login, served over gRPC. User records live in a
//! credential store injected at construction: Postgres through SeaORM, or an
//! in-memory map for development and tests.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod service;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::{info, warn};

use crate::config::AuthServiceConfig;
use crate::grpc::AuthGrpcService;
use crate::infra::Database;
use crate::service::{Authenticator, TokenIssuer};
use crate::store::{CredentialStore, MemoryCredentialStore, PgCredentialStore};
use common::DatabaseConfig;

/// Run the gRPC server with the given configuration.
///
/// Hashing parameters and signing key are checked before any connection is
/// opened, so bad configuration never reaches a request.
pub async fn run_server(config: AuthServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let hashing = config.hashing_policy()?;
    let tokens = TokenIssuer::new(&config.jwt)?;

    let store = connect_store(&config.database).await?;
    let auth_service = Arc::new(Authenticator::new(store, hashing, tokens)?);

    // Create gRPC service
    let grpc_service = AuthGrpcService::new(auth_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.service.host, config.service.port).parse()?;
    info!("Auth service listening on {}", addr);

    Server::builder()
        .add_service(proto::AuthServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("Auth service stopped");
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.is_memory() {
        return Err("Migrations need a database URL, not the in-memory store".into());
    }

    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

async fn connect_store(
    config: &DatabaseConfig,
) -> Result<Arc<dyn CredentialStore>, sea_orm::DbErr> {
    if config.is_memory() {
        warn!("Using in-memory credential store; records are lost on exit");
        return Ok(Arc::new(MemoryCredentialStore::new()));
    }

    let db = Database::connect(config).await?;
    db.ping().await?;
    info!("Credential store reachable");
    Ok(Arc::new(PgCredentialStore::new(db.get_connection())))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
