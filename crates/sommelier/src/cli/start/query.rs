use alloy_primitives::{Address, B256};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use color_eyre::Report;
use somm_state::Store;
use somm_types::{
    CorkResult, GenesisState, OutgoingContractCall, Params, ScheduledCork, Validator,
    ValidatorAddress,
    response::{
        IdentifiedCorkResult, InvalidationNonce, SignerSequence, Status, ValidatorCorkCount,
    },
};

/// Every route reads the latest committed state, never the block in progress.
pub fn app(store: Store) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/params", get(params))
        .route("/cellars", get(cellars))
        .route("/validators", get(validators))
        .route("/validators/{address}/cork_count", get(validator_cork_count))
        .route("/corks/scheduled", get(scheduled_corks))
        .route("/corks/scheduled/heights", get(scheduled_block_heights))
        .route("/corks/scheduled/height/{height}", get(scheduled_corks_by_height))
        .route("/corks/scheduled/id/{id}", get(scheduled_corks_by_id))
        .route("/corks/results", get(cork_results))
        .route("/corks/results/{id}", get(cork_result))
        .route("/bridge/outgoing", get(outgoing_contract_calls))
        .route("/bridge/nonce", get(invalidation_nonce))
        .route("/sequences/{public_key}", get(sequence))
        .route("/genesis", get(genesis))
        .with_state(store)
}

/// An error response, rendered as plain text.
struct QueryError(StatusCode, String);

impl From<Report> for QueryError {
    fn from(e: Report) -> Self {
        QueryError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let QueryError(status, message) = self;
        (status, [("Content-Type", "text/plain")], message).into_response()
    }
}

type QueryResult<T> = Result<Json<T>, QueryError>;

fn bad_request(e: impl std::fmt::Display) -> QueryError {
    QueryError(StatusCode::BAD_REQUEST, e.to_string())
}

fn not_found(what: impl std::fmt::Display) -> QueryError {
    QueryError(StatusCode::NOT_FOUND, format!("{what} not found"))
}

fn parse_id(id: &str) -> Result<B256, QueryError> {
    id.parse().map_err(bad_request)
}

async fn status(State(store): State<Store>) -> QueryResult<Status> {
    let state = store.latest();
    Ok(Json(Status {
        chain_id: state.chain_id().await?.0,
        block_height: state.block_height().await?,
        app_hash: store.app_hash().await?.to_string(),
    }))
}

async fn params(State(store): State<Store>) -> QueryResult<Params> {
    Ok(Json(store.latest().params().await?))
}

async fn cellars(State(store): State<Store>) -> QueryResult<Vec<Address>> {
    Ok(Json(store.latest().cellar_ids().await?))
}

async fn validators(State(store): State<Store>) -> QueryResult<Vec<Validator>> {
    Ok(Json(store.latest().validators().await?))
}

async fn validator_cork_count(
    State(store): State<Store>,
    Path(address): Path<String>,
) -> QueryResult<ValidatorCorkCount> {
    let validator: ValidatorAddress = address.parse().map_err(bad_request)?;
    Ok(Json(ValidatorCorkCount {
        validator,
        count: store.latest().validator_cork_count(validator).await?,
    }))
}

async fn scheduled_corks(State(store): State<Store>) -> QueryResult<Vec<ScheduledCork>> {
    Ok(Json(store.latest().scheduled_corks().await?))
}

async fn scheduled_block_heights(State(store): State<Store>) -> QueryResult<Vec<u64>> {
    Ok(Json(store.latest().scheduled_block_heights().await?))
}

async fn scheduled_corks_by_height(
    State(store): State<Store>,
    Path(height): Path<u64>,
) -> QueryResult<Vec<ScheduledCork>> {
    Ok(Json(store.latest().scheduled_corks_by_height(height).await?))
}

async fn scheduled_corks_by_id(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> QueryResult<Vec<ScheduledCork>> {
    let id = parse_id(&id)?;
    Ok(Json(store.latest().scheduled_corks_by_id(id).await?))
}

async fn cork_results(State(store): State<Store>) -> QueryResult<Vec<IdentifiedCorkResult>> {
    Ok(Json(
        store
            .latest()
            .cork_results()
            .await?
            .into_iter()
            .map(|(id, result)| IdentifiedCorkResult { id, result })
            .collect(),
    ))
}

async fn cork_result(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> QueryResult<CorkResult> {
    let id = parse_id(&id)?;
    store
        .latest()
        .cork_result(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(format!("cork result {id}")))
}

async fn outgoing_contract_calls(
    State(store): State<Store>,
) -> QueryResult<Vec<OutgoingContractCall>> {
    Ok(Json(store.latest().outgoing_contract_calls().await?))
}

async fn invalidation_nonce(State(store): State<Store>) -> QueryResult<InvalidationNonce> {
    Ok(Json(InvalidationNonce {
        invalidation_nonce: store.latest().invalidation_nonce().await?,
    }))
}

async fn sequence(
    State(store): State<Store>,
    Path(public_key): Path<String>,
) -> QueryResult<SignerSequence> {
    let signer = hex::decode(&public_key).map_err(bad_request)?;
    Ok(Json(SignerSequence {
        sequence: store.latest().sequence(&signer).await?,
        signer: public_key,
    }))
}

async fn genesis(State(store): State<Store>) -> QueryResult<GenesisState> {
    Ok(Json(store.latest().export_genesis().await?))
}
