// src/handlers/properties.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::property::{Owner, Property, PropertyDetail, ServiceType, Tenant},
};

// =============================================================================
//  ÁREA 1: IMÓVEIS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyPayload {
    #[validate(length(min = 5, message = "O endereço deve ter no mínimo 5 caracteres"))]
    #[schema(example = "100 Test St, Vancouver")]
    pub property_address: String,

    #[schema(example = "K-042")]
    pub key_number: Option<String>,

    pub service_type: ServiceType,

    pub strata_company: Option<String>,
    pub strata_contact_name: Option<String>,
    pub strata_phone: Option<String>,
}

// O endereço é identidade e fica de fora do update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyPayload {
    pub key_number: Option<String>,
    pub service_type: ServiceType,
    pub strata_company: Option<String>,
    pub strata_contact_name: Option<String>,
    pub strata_phone: Option<String>,
}

// POST /api/properties
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "Imóveis",
    request_body = CreatePropertyPayload,
    responses(
        (status = 201, description = "Imóvel criado", body = Property),
        (status = 409, description = "Endereço já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_property(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePropertyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let property = app_state
        .property_service
        .create_property(
            &app_state.db_pool,
            &payload.property_address,
            payload.key_number.as_deref(),
            payload.service_type,
            payload.strata_company.as_deref(),
            payload.strata_contact_name.as_deref(),
            payload.strata_phone.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(property)))
}

// GET /api/properties
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Imóveis",
    responses((status = 200, description = "Lista de imóveis", body = Vec<Property>)),
    security(("api_jwt" = []))
)]
pub async fn list_properties(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let properties = app_state.property_service.list_properties(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(properties)))
}

// GET /api/properties/{address}
#[utoipa::path(
    get,
    path = "/api/properties/{address}",
    tag = "Imóveis",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    responses(
        (status = 200, description = "Detalhe do imóvel", body = PropertyDetail),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_property_detail(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state
        .property_service
        .property_detail(&app_state.db_pool, &address)
        .await?;

    Ok((StatusCode::OK, Json(detail)))
}

// PUT /api/properties/{address}
#[utoipa::path(
    put,
    path = "/api/properties/{address}",
    tag = "Imóveis",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    request_body = UpdatePropertyPayload,
    responses(
        (status = 200, description = "Imóvel atualizado", body = Property),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_property(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
    Json(payload): Json<UpdatePropertyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let property = app_state
        .property_service
        .update_property(
            &app_state.db_pool,
            &address,
            payload.key_number.as_deref(),
            payload.service_type,
            payload.strata_company.as_deref(),
            payload.strata_contact_name.as_deref(),
            payload.strata_phone.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(property)))
}

// DELETE /api/properties/{address}
#[utoipa::path(
    delete,
    path = "/api/properties/{address}",
    tag = "Imóveis",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    responses(
        (status = 204, description = "Imóvel removido"),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_property(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .property_service
        .delete_property(&app_state.db_pool, &address)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: PROPRIETÁRIOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "João Pereira")]
    pub name: String,

    pub contact_number: Option<String>,

    // Datas chegam como string e passam pelo normalizador
    #[schema(example = "1960-04-12")]
    pub birthday: Option<String>,

    pub residential_address: Option<String>,
}

// POST /api/properties/{address}/owners
#[utoipa::path(
    post,
    path = "/api/properties/{address}/owners",
    tag = "Proprietários",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    request_body = OwnerPayload,
    responses(
        (status = 201, description = "Proprietário criado", body = Owner),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_owner(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
    Json(payload): Json<OwnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let owner = app_state
        .property_service
        .create_owner(
            &app_state.db_pool,
            &address,
            &payload.name,
            payload.contact_number.as_deref(),
            payload.birthday.as_deref(),
            payload.residential_address.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(owner)))
}

// GET /api/properties/{address}/owners
#[utoipa::path(
    get,
    path = "/api/properties/{address}/owners",
    tag = "Proprietários",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    responses((status = 200, description = "Proprietários do imóvel", body = Vec<Owner>)),
    security(("api_jwt" = []))
)]
pub async fn list_owners(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let owners = app_state
        .property_service
        .list_owners(&app_state.db_pool, &address)
        .await?;

    Ok((StatusCode::OK, Json(owners)))
}

// PUT /api/owners/{id}
#[utoipa::path(
    put,
    path = "/api/owners/{id}",
    tag = "Proprietários",
    params(("id" = Uuid, Path, description = "ID do proprietário")),
    request_body = OwnerPayload,
    responses(
        (status = 200, description = "Proprietário atualizado", body = Owner),
        (status = 404, description = "Proprietário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_owner(
    State(app_state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(payload): Json<OwnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let owner = app_state
        .property_service
        .update_owner(
            &app_state.db_pool,
            owner_id,
            &payload.name,
            payload.contact_number.as_deref(),
            payload.birthday.as_deref(),
            payload.residential_address.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(owner)))
}

// DELETE /api/owners/{id}
#[utoipa::path(
    delete,
    path = "/api/owners/{id}",
    tag = "Proprietários",
    params(("id" = Uuid, Path, description = "ID do proprietário")),
    responses(
        (status = 204, description = "Proprietário removido"),
        (status = 404, description = "Proprietário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_owner(
    State(app_state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .property_service
        .delete_owner(&app_state.db_pool, owner_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 3: INQUILINOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(length(min = 8, message = "Data de entrada obrigatória"))]
    #[schema(example = "2023-06-01")]
    pub move_in_date: String,

    // Preencher aqui registra a saída do inquilino
    #[schema(example = "2024-06-01")]
    pub move_out_date: Option<String>,

    pub contact_number: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[schema(example = "1990-05-20")]
    pub birthday: Option<String>,

    #[serde(default)]
    pub is_primary: bool,
}

// POST /api/properties/{address}/tenants
#[utoipa::path(
    post,
    path = "/api/properties/{address}/tenants",
    tag = "Inquilinos",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    request_body = TenantPayload,
    responses(
        (status = 201, description = "Inquilino criado", body = Tenant),
        (status = 400, description = "Período de locação inválido"),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tenant(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
    Json(payload): Json<TenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .property_service
        .create_tenant(
            &app_state.db_pool,
            &address,
            &payload.name,
            &payload.move_in_date,
            payload.move_out_date.as_deref(),
            payload.contact_number.as_deref(),
            payload.email.as_deref(),
            payload.birthday.as_deref(),
            payload.is_primary,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(tenant)))
}

// GET /api/properties/{address}/tenants
#[utoipa::path(
    get,
    path = "/api/properties/{address}/tenants",
    tag = "Inquilinos",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    responses((status = 200, description = "Inquilinos do imóvel (ativos e antigos)", body = Vec<Tenant>)),
    security(("api_jwt" = []))
)]
pub async fn list_tenants(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenants = app_state
        .property_service
        .list_tenants(&app_state.db_pool, &address)
        .await?;

    Ok((StatusCode::OK, Json(tenants)))
}

// PUT /api/tenants/{id}
#[utoipa::path(
    put,
    path = "/api/tenants/{id}",
    tag = "Inquilinos",
    params(("id" = Uuid, Path, description = "ID do inquilino")),
    request_body = TenantPayload,
    responses(
        (status = 200, description = "Inquilino atualizado", body = Tenant),
        (status = 400, description = "Período de locação inválido"),
        (status = 404, description = "Inquilino não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tenant(
    State(app_state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<TenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .property_service
        .update_tenant(
            &app_state.db_pool,
            tenant_id,
            &payload.name,
            &payload.move_in_date,
            payload.move_out_date.as_deref(),
            payload.contact_number.as_deref(),
            payload.email.as_deref(),
            payload.birthday.as_deref(),
            payload.is_primary,
        )
        .await?;

    Ok((StatusCode::OK, Json(tenant)))
}

// DELETE /api/tenants/{id}
#[utoipa::path(
    delete,
    path = "/api/tenants/{id}",
    tag = "Inquilinos",
    params(("id" = Uuid, Path, description = "ID do inquilino")),
    responses(
        (status = 204, description = "Inquilino removido"),
        (status = 404, description = "Inquilino não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_tenant(
    State(app_state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .property_service
        .delete_tenant(&app_state.db_pool, tenant_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
