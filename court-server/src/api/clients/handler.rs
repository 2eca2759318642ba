//! Client API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::client;
use crate::utils::time::parse_date;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Client, ClientCreate, ClientUpdate, CreatedResponse, ListResponse};

fn validate_create(payload: &ClientCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.surname, "surname", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    parse_date(&payload.birthdate)?;
    if let Some(email) = &payload.email {
        validate_email(email, "email")?;
    }
    Ok(())
}

fn validate_update(payload: &ClientUpdate) -> AppResult<()> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.surname, "surname", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    if let Some(birthdate) = &payload.birthdate {
        parse_date(birthdate)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email, "email")?;
    }
    Ok(())
}

/// GET /api/clients - 获取所有客户
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ListResponse<Client>>> {
    let clients = client::find_all(&state.pool).await?;
    Ok(Json(ListResponse::new(clients)))
}

/// GET /api/clients/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let c = client::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound).with_detail("id", id))?;
    Ok(Json(c))
}

/// POST /api/clients - 创建客户
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    validate_create(&payload)?;
    let c = client::create(&state.pool, payload).await?;
    tracing::info!(id = c.id, "Client created");
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(c.id, c.created_at))))
}

/// PUT /api/clients/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    validate_update(&payload)?;
    let c = client::update(&state.pool, id, payload).await?;
    Ok(Json(c))
}

/// DELETE /api/clients/:id - 删除客户 (有交易记录时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = client::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::ClientNotFound).with_detail("id", id));
    }
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ClientCreate {
        ClientCreate {
            name: "Anna".into(),
            surname: "Nowak".into(),
            address: "Polna 1, Kraków".into(),
            phone: "+48 600 100 200".into(),
            birthdate: "1990-04-12".into(),
            email: None,
            is_permanent: false,
        }
    }

    #[test]
    fn test_client_without_email_is_valid() {
        assert!(validate_create(&payload()).is_ok());
    }

    #[test]
    fn test_client_requires_surname_and_date() {
        let mut p = payload();
        p.surname = " ".into();
        assert!(validate_create(&p).is_err());

        let mut p = payload();
        p.birthdate = "12.04.1990".into();
        assert!(validate_create(&p).is_err());

        let mut p = payload();
        p.email = Some("not-an-email".into());
        assert!(validate_create(&p).is_err());
    }
}
