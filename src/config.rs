// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{PropertyRepository, RatesRepository, UserRepository},
    services::{
        auth::AuthService, property_service::PropertyService, rate_service::RateService,
        reminder_service::ReminderService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    // Serviços montados uma vez e compartilhados por todos os handlers
    pub auth_service: AuthService,
    pub property_service: PropertyService,
    pub rate_service: RateService,
    pub reminder_service: ReminderService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let property_repo = PropertyRepository::new(db_pool.clone());
        let rates_repo = RatesRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone(), db_pool.clone());
        let property_service = PropertyService::new(property_repo.clone(), rates_repo.clone());
        let rate_service = RateService::new(rates_repo.clone(), property_repo.clone());
        let reminder_service = ReminderService::new(rates_repo, property_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            property_service,
            rate_service,
            reminder_service,
        })
    }
}
