use std::{process, sync::Arc};

use quire::{
    application::{
        admin::{
            chrome::AdminChromeService,
            posts::{AdminPostEditService, PostEditOptions},
        },
        error::{AppError, ErrorReport},
        render::{PreviewRenderer, preview_service},
        repos::{CategoriesRepo, PostsRepo, PostsWriteRepo},
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, ApiState},
        memory::InMemoryRepositories,
        telemetry,
    },
};
use axum::http::StatusCode;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let chain = ErrorReport::from_error("quire::main", StatusCode::INTERNAL_SERVER_ERROR, error)
        .messages
        .join(": ");

    if dispatcher::has_been_set() {
        error!(error = %chain, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %chain, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

struct Repositories {
    posts: Arc<dyn PostsRepo>,
    posts_write: Arc<dyn PostsWriteRepo>,
    categories: Arc<dyn CategoriesRepo>,
}

impl Repositories {
    fn from_shared<R>(repos: Arc<R>) -> Self
    where
        R: PostsRepo + PostsWriteRepo + CategoriesRepo + 'static,
    {
        Self {
            posts: repos.clone(),
            posts_write: repos.clone(),
            categories: repos,
        }
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;

    let options = PostEditOptions {
        warn_when_unsaved_changes: settings.editor.warn_when_unsaved_changes,
        category_page_size: settings.editor.category_page_size.get(),
    };
    let posts = Arc::new(AdminPostEditService::new(
        repositories.posts,
        repositories.posts_write,
        repositories.categories,
        options,
    ));
    let preview: Arc<dyn PreviewRenderer> = preview_service();

    let admin_state = AdminState {
        chrome: Arc::new(AdminChromeService::new(settings.editor.brand_title.clone())),
        posts: posts.clone(),
        preview,
    };
    let api_state = ApiState { posts };

    serve_http(&settings, admin_state, api_state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let database_url = require_database_url(&settings)?;
    let pool = PostgresRepositories::connect(database_url, 1)
        .await
        .map_err(InfraError::Connect)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::Migrate)?;

    info!(target = "quire::migrate", "migrations applied");
    Ok(())
}

fn require_database_url(settings: &config::Settings) -> Result<&str, AppError> {
    settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)
}

async fn init_repositories(settings: &config::Settings) -> Result<Repositories, AppError> {
    let Some(database_url) = settings.database.url.as_deref() else {
        warn!(
            target = "quire::startup",
            "no database url configured; serving seeded in-memory data"
        );
        return Ok(Repositories::from_shared(Arc::new(
            InMemoryRepositories::seeded(),
        )));
    };

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(InfraError::Connect)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::Migrate)?;

    Ok(Repositories::from_shared(Arc::new(
        PostgresRepositories::new(pool),
    )))
}

async fn serve_http(
    settings: &config::Settings,
    admin_state: AdminState,
    api_state: ApiState,
) -> Result<(), AppError> {
    let router = http::build_router(admin_state, api_state);

    let addr = settings.server.addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| InfraError::Bind { addr, source })?;

    info!(
        target = "quire::startup",
        addr = %settings.server.addr,
        "listening"
    );

    let grace = settings.server.graceful_shutdown;
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
        async move {
            shutdown_signal().await;
            let _ = stop_tx.send(());
        },
    );

    let drain_deadline = async move {
        if stop_rx.await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(InfraError::Serve)?;
        }
        _ = drain_deadline => {
            warn!(
                target = "quire::shutdown",
                grace_seconds = grace.as_secs(),
                "graceful shutdown timed out; dropping open connections"
            );
        }
    }

    info!(target = "quire::shutdown", "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            target = "quire::shutdown",
            error = %err,
            "failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
    info!(target = "quire::shutdown", "shutdown requested");
}
