//! API Routes
//!
//! HTTP endpoint definitions. Handlers validate their input, call the
//! ledger and serialize what it returns; nothing else lives here.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query, State},
    http::{request::Parts, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Balance, Transaction};
use crate::error::{AppError, AppResult};
use crate::ledger::Ledger;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
}

impl AppState {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }
}

// =========================================================================
// Request/Response types
// =========================================================================

/// `?amount=` query parameter of deposit and withdraw.
///
/// Kept as a raw string so parse failures surface as `invalid_amount`.
/// When the parameter repeats, the first occurrence wins.
#[derive(Debug, Default)]
pub struct AmountQuery {
    pub amount: Option<String>,
}

impl AmountQuery {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let amount = pairs
            .into_iter()
            .find(|(key, _)| key == "amount")
            .map(|(_, value)| value);
        Self { amount }
    }

    pub fn amount(&self) -> AppResult<Amount> {
        let raw = self
            .amount
            .as_deref()
            .ok_or(AppError::MissingParameter("amount"))?;
        Ok(raw.parse::<Amount>()?)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AmountQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::MalformedQuery(rejection.body_text()))?;
        Ok(Self::from_pairs(pairs))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub amount: Balance,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/balance", get(get_balance))
        .route("/transactions", get(get_transactions))
}

/// POST /deposit?amount=N
async fn deposit(
    State(state): State<AppState>,
    query: AmountQuery,
) -> AppResult<StatusCode> {
    let amount = query.amount()?;
    state.ledger.deposit(amount)?;
    Ok(StatusCode::OK)
}

/// POST /withdraw?amount=N
async fn withdraw(
    State(state): State<AppState>,
    query: AmountQuery,
) -> AppResult<StatusCode> {
    let amount = query.amount()?;
    state.ledger.withdraw(amount)?;
    Ok(StatusCode::OK)
}

/// GET /balance
async fn get_balance(State(state): State<AppState>) -> Json<BalanceResponse> {
    Json(BalanceResponse {
        amount: state.ledger.balance(),
    })
}

/// GET /transactions
async fn get_transactions(State(state): State<AppState>) -> Json<TransactionsResponse> {
    Json(TransactionsResponse {
        transactions: state.ledger.transactions(),
    })
}
