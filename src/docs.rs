// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Imóveis ---
        handlers::properties::create_property,
        handlers::properties::list_properties,
        handlers::properties::get_property_detail,
        handlers::properties::update_property,
        handlers::properties::delete_property,

        // --- Proprietários ---
        handlers::properties::create_owner,
        handlers::properties::list_owners,
        handlers::properties::update_owner,
        handlers::properties::delete_owner,

        // --- Inquilinos ---
        handlers::properties::create_tenant,
        handlers::properties::list_tenants,
        handlers::properties::update_tenant,
        handlers::properties::delete_tenant,

        // --- Reajustes ---
        handlers::rates::record_initial_rate,
        handlers::rates::reset_initial_rate,
        handlers::rates::process_increase,
        handlers::rates::get_rate_history,

        // --- Lembretes ---
        handlers::reminders::rate_reminders,
        handlers::reminders::birthday_reminders,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Imóveis ---
            models::property::ServiceType,
            models::property::Property,
            models::property::Owner,
            models::property::Tenant,
            models::property::PropertyDetail,

            // --- Reajustes ---
            models::rates::RateIncrease,
            models::rates::RateHistory,
            models::rates::RateHistoryEntry,

            // --- Lembretes ---
            models::reminders::ContactRole,
            models::reminders::RateReminderEntry,
            models::reminders::BirthdayReminderEntry,

            // --- Payloads ---
            handlers::properties::CreatePropertyPayload,
            handlers::properties::UpdatePropertyPayload,
            handlers::properties::OwnerPayload,
            handlers::properties::TenantPayload,
            handlers::rates::InitialRatePayload,
            handlers::rates::ProcessIncreasePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Imóveis", description = "Cadastro e Detalhe dos Imóveis"),
        (name = "Proprietários", description = "Proprietários por Imóvel"),
        (name = "Inquilinos", description = "Inquilinos Atuais e Antigos"),
        (name = "Reajustes", description = "Aluguel Inicial, Reajustes e Histórico"),
        (name = "Lembretes", description = "Lembretes de Reajuste e Aniversários")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
