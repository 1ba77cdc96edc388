//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let property_routes = Router::new()
        .route("/"
               ,post(handlers::properties::create_property)
               .get(handlers::properties::list_properties)
        )
        .route("/{address}"
               ,get(handlers::properties::get_property_detail)
               .put(handlers::properties::update_property)
               .delete(handlers::properties::delete_property)
        )
        .route("/{address}/owners"
               ,post(handlers::properties::create_owner)
               .get(handlers::properties::list_owners)
        )
        .route("/{address}/tenants"
               ,post(handlers::properties::create_tenant)
               .get(handlers::properties::list_tenants)
        )
        .route("/{address}/rates/initial"
               ,post(handlers::rates::record_initial_rate)
               .put(handlers::rates::reset_initial_rate)
        )
        .route("/{address}/rates/increase"
               ,post(handlers::rates::process_increase)
        )
        .route("/{address}/rates/history"
               ,get(handlers::rates::get_rate_history)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Edição/remoção de proprietários e inquilinos pelo próprio ID
    let owner_routes = Router::new()
        .route("/{id}"
               ,put(handlers::properties::update_owner)
               .delete(handlers::properties::delete_owner)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let tenant_routes = Router::new()
        .route("/{id}"
               ,put(handlers::properties::update_tenant)
               .delete(handlers::properties::delete_tenant)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let reminder_routes = Router::new()
        .route("/rates", get(handlers::reminders::rate_reminders))
        .route("/birthdays", get(handlers::reminders::birthday_reminders))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/properties", property_routes)
        .nest("/api/owners", owner_routes)
        .nest("/api/tenants", tenant_routes)
        .nest("/api/reminders", reminder_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
